// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! The command provider contract and a table-backed implementation of it.
//!
//! Providers never store help metadata. `command_description` and
//! `command_options` run the command with `--help` against a throwaway
//! [`MemoryTerminal`] and parse the usage text it hands back.

use log::warn;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use crate::completers::{CompletionSources, WordCompleter};
use crate::error::{ShellError, ShellResult};
use crate::evaluator::{Evaluator, JsonEvaluator};
use crate::help::{HelpDescriptor, OptionDescriptor};
use crate::registry::CommandIndex;
use crate::terminal::{MemoryTerminal, Terminal};

/// What running a command produced.
#[derive(Debug)]
pub enum CommandResult {
    /// Normal completion; `None` prints nothing.
    Value(Option<Value>),
    /// The help flag was given; carries the usage text.
    HelpRequested(String),
    Error(ShellError),
}

impl CommandResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<ShellResult<Option<Value>>> for CommandResult {
    fn from(result: ShellResult<Option<Value>>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(e) => Self::Error(e),
        }
    }
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub terminal: &'a mut dyn Terminal,
    pub evaluator: &'a dyn Evaluator,
    /// Absent during help introspection.
    pub index: Option<&'a CommandIndex>,
}

pub type Executor = Box<dyn Fn(&[String], &mut CommandContext<'_>) -> CommandResult>;
pub type CompleterFactory = Box<dyn Fn(&str, &CompletionSources) -> Box<dyn WordCompleter>>;

/// Executor plus optional completer factory for one command.
pub struct CommandMethods {
    execute: Executor,
    completer: Option<CompleterFactory>,
}

impl CommandMethods {
    pub fn new(execute: impl Fn(&[String], &mut CommandContext<'_>) -> CommandResult + 'static) -> Self {
        Self {
            execute: Box::new(execute),
            completer: None,
        }
    }

    pub fn with_completer(
        mut self,
        factory: impl Fn(&str, &CompletionSources) -> Box<dyn WordCompleter> + 'static,
    ) -> Self {
        self.completer = Some(Box::new(factory));
        self
    }
}

pub trait CommandProvider {
    /// Name used in logs and `help` output.
    fn provider_name(&self) -> &str;

    fn command_names(&self) -> BTreeSet<String>;

    /// alias -> canonical command name
    fn command_aliases(&self) -> HashMap<String, String>;

    /// True iff `name` is a command name or an alias of this provider.
    fn has_command(&self, name: &str) -> bool;

    /// Run a command owned by this provider.
    fn execute(&self, name: &str, args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult;

    /// The command's own completer, if it has one.
    fn command_completer(
        &self,
        name: &str,
        sources: &CompletionSources,
    ) -> Option<Box<dyn WordCompleter>>;

    /// Usage text, obtained by running the command with `--help`.
    fn usage_text(&self, name: &str) -> Option<String> {
        let mut terminal = MemoryTerminal::new();
        let evaluator = JsonEvaluator::new();
        let mut ctx = CommandContext {
            terminal: &mut terminal,
            evaluator: &evaluator,
            index: None,
        };
        match self.execute(name, &["--help".to_string()], &mut ctx) {
            CommandResult::HelpRequested(text) => Some(text),
            other => {
                warn!(
                    "{}: '{name} --help' did not return usage ({other:?})",
                    self.provider_name()
                );
                None
            }
        }
    }

    fn command_description(&self, name: &str) -> Option<HelpDescriptor> {
        self.usage_text(name).map(|text| HelpDescriptor::parse(&text))
    }

    fn command_options(&self, name: &str) -> Vec<OptionDescriptor> {
        self.command_description(name)
            .map(|desc| desc.options)
            .unwrap_or_default()
    }
}

/// A provider backed by a map of [`CommandMethods`].
pub struct CommandTable {
    name: String,
    commands: HashMap<String, CommandMethods>,
    aliases: HashMap<String, String>,
}

impl CommandTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a command; a name already taken by a command or an alias
    /// is rejected.
    pub fn command(mut self, name: &str, methods: CommandMethods) -> ShellResult<Self> {
        if self.has_command(name) {
            return Err(ShellError::DuplicateCommand {
                provider: self.name.clone(),
                name: name.to_string(),
            });
        }
        self.commands.insert(name.to_string(), methods);
        Ok(self)
    }

    /// Register `alias` for an existing command.
    pub fn alias(mut self, alias: &str, target: &str) -> ShellResult<Self> {
        if self.has_command(alias) {
            return Err(ShellError::DuplicateCommand {
                provider: self.name.clone(),
                name: alias.to_string(),
            });
        }
        if !self.commands.contains_key(target) {
            return Err(ShellError::InvalidAlias {
                provider: self.name.clone(),
                alias: alias.to_string(),
                target: target.to_string(),
            });
        }
        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(self)
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.commands.get_key_value(name) {
            return Some(key);
        }
        self.aliases.get(name).map(String::as_str)
    }
}

impl CommandProvider for CommandTable {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn command_names(&self) -> BTreeSet<String> {
        self.commands.keys().cloned().collect()
    }

    fn command_aliases(&self) -> HashMap<String, String> {
        self.aliases.clone()
    }

    fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name) || self.aliases.contains_key(name)
    }

    fn execute(&self, name: &str, args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
        match self.resolve(name).and_then(|c| self.commands.get(c)) {
            Some(methods) => (methods.execute)(args, ctx),
            None => CommandResult::Error(ShellError::command(name, "command not found")),
        }
    }

    fn command_completer(
        &self,
        name: &str,
        sources: &CompletionSources,
    ) -> Option<Box<dyn WordCompleter>> {
        let canonical = self.resolve(name)?;
        let factory = self.commands.get(canonical)?.completer.as_ref()?;
        Some(factory(canonical, sources))
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Ordered set of command providers plus the fallback evaluator.

use log::{debug, warn};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::commands::{CommandContext, CommandProvider, CommandResult};
use crate::completers::{NameProducer, SystemCompleter, compile_provider};
use crate::evaluator::Evaluator;
use crate::help::HelpDescriptor;
use crate::parsing::ParsedLine;
use crate::terminal::Terminal;

/// Read-only view of the providers, in precedence order.
///
/// Cheap to clone; commands such as `help` and the tailtip hold one.
#[derive(Clone)]
pub struct CommandIndex {
    providers: Arc<[Arc<dyn CommandProvider>]>,
}

impl CommandIndex {
    pub fn new(providers: Vec<Arc<dyn CommandProvider>>) -> Self {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for provider in &providers {
            let names = provider
                .command_names()
                .into_iter()
                .chain(provider.command_aliases().into_keys());
            for name in names {
                if !seen.insert(name.clone()) {
                    warn!(
                        "{}: '{name}' is shadowed by an earlier provider",
                        provider.provider_name()
                    );
                }
            }
        }
        Self {
            providers: providers.into(),
        }
    }

    pub fn providers(&self) -> &[Arc<dyn CommandProvider>] {
        &self.providers
    }

    /// First provider claiming `name`.
    pub fn owner(&self, name: &str) -> Option<&Arc<dyn CommandProvider>> {
        self.providers.iter().find(|p| p.has_command(name))
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.owner(name).is_some()
    }

    pub fn usage_text(&self, name: &str) -> Option<String> {
        self.owner(name)?.usage_text(name)
    }

    pub fn describe(&self, name: &str) -> Option<HelpDescriptor> {
        self.owner(name)?.command_description(name)
    }

    /// Command names and aliases of every provider, sorted.
    pub fn command_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for provider in self.providers.iter() {
            names.extend(provider.command_names());
            names.extend(provider.command_aliases().into_keys());
        }
        names.into_iter().collect()
    }
}

pub struct Registry {
    index: CommandIndex,
    evaluator: Box<dyn Evaluator>,
}

impl Registry {
    pub fn new(providers: Vec<Arc<dyn CommandProvider>>, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            index: CommandIndex::new(providers),
            evaluator,
        }
    }

    pub fn index(&self) -> &CommandIndex {
        &self.index
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    pub fn evaluator_mut(&mut self) -> &mut dyn Evaluator {
        self.evaluator.as_mut()
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.index.has_command(name)
    }

    pub fn describe(&self, name: &str) -> Option<HelpDescriptor> {
        self.index.describe(name)
    }

    /// Route a parsed line to the provider owning its first word, or hand
    /// the whole line to the evaluator.
    pub fn dispatch(&mut self, line: &ParsedLine, terminal: &mut dyn Terminal) -> CommandResult {
        if let Some(command) = line.command() {
            if let Some(provider) = self.index.owner(command) {
                debug!("{command}: dispatching to {}", provider.provider_name());
                let mut ctx = CommandContext {
                    terminal,
                    evaluator: self.evaluator.as_ref(),
                    index: Some(&self.index),
                };
                return provider.execute(command, line.args(), &mut ctx);
            }
        }
        debug!("no provider claims {:?}, evaluating", line.command());
        self.evaluator.execute(&line.line).into()
    }

    /// Merge every provider's completers; earlier providers win on
    /// conflicting names.
    pub fn compile_completers(&self) -> SystemCompleter {
        let index = self.index.clone();
        let commands: NameProducer = Arc::new(move || index.command_names());
        let mut merged = SystemCompleter::new();
        for provider in self.index.providers().iter().rev() {
            merged.merge(compile_provider(provider, Arc::clone(&commands)));
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandMethods, CommandTable};
    use crate::evaluator::JsonEvaluator;
    use crate::help::{parse_args, usage_command};
    use crate::parsing::{LineParser, ParseContext};
    use crate::terminal::MemoryTerminal;
    use serde_json::json;

    fn echo_provider(name: &str, reply: &'static str) -> Arc<dyn CommandProvider> {
        let table = CommandTable::new(name).command(
            "ping",
            CommandMethods::new(move |args, _ctx| {
                match parse_args(usage_command("ping", "reply", "ping"), args).into_matches("ping") {
                    Ok(_) => CommandResult::Value(Some(json!(reply))),
                    Err(result) => result,
                }
            }),
        );
        Arc::new(table.unwrap())
    }

    fn parse(line: &str) -> ParsedLine {
        LineParser::new()
            .parse(line, line.len(), ParseContext::AcceptLine)
            .unwrap()
    }

    #[test]
    fn test_first_provider_wins() {
        let mut registry = Registry::new(
            vec![echo_provider("first", "one"), echo_provider("second", "two")],
            Box::new(JsonEvaluator::new()),
        );
        let mut terminal = MemoryTerminal::new();
        let result = registry.dispatch(&parse("ping"), &mut terminal);
        assert!(matches!(result, CommandResult::Value(Some(v)) if v == json!("one")));
    }

    #[test]
    fn test_unclaimed_line_goes_to_evaluator() {
        let mut registry = Registry::new(vec![echo_provider("p", "x")], Box::new(JsonEvaluator::new()));
        let mut terminal = MemoryTerminal::new();
        let result = registry.dispatch(&parse("answer = 42"), &mut terminal);
        assert!(matches!(result, CommandResult::Value(Some(v)) if v == json!(42)));
        assert_eq!(registry.evaluator().get("answer"), Some(&json!(42)));
    }

    #[test]
    fn test_describe_and_names() {
        let registry = Registry::new(vec![echo_provider("p", "x")], Box::new(JsonEvaluator::new()));
        assert_eq!(registry.describe("ping").unwrap().synopsis, "reply");
        assert!(registry.describe("nope").is_none());
        assert_eq!(registry.index().command_names(), vec!["ping"]);
        assert!(registry.compile_completers().contains("ping"));
    }
}

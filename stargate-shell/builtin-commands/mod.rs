// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

pub mod clear;
pub mod describe_command;
pub mod help;
pub mod list_variables;
pub mod testkey;
pub mod tput;

use std::io;
use std::sync::Arc;

use crate::commands::{CommandMethods, CommandProvider, CommandResult, CommandTable};
use crate::completers::{
    ArgumentCompleter, CompletionSources, NullCompleter, OptionCompleter, StringsCompleter,
    WordCompleter,
};
use crate::error::{ShellError, ShellResult};

pub const BUILTINS: &str = "builtins";
pub const TERMINAL: &str = "terminal";

/// `help`, `describe` and `vars`.
pub fn builtin_provider() -> ShellResult<CommandTable> {
    CommandTable::new(BUILTINS)
        .command(
            help::NAME,
            CommandMethods::new(help::execute).with_completer(command_name_completer),
        )?
        .command(
            describe_command::NAME,
            CommandMethods::new(describe_command::execute).with_completer(command_name_completer),
        )?
        .command(list_variables::NAME, CommandMethods::new(list_variables::execute))?
        .alias("h", help::NAME)?
        .alias("describe-command", describe_command::NAME)?
        .alias("list-variables", list_variables::NAME)
}

/// `tput`, `testkey` and `clear`.
pub fn terminal_provider() -> ShellResult<CommandTable> {
    CommandTable::new(TERMINAL)
        .command(
            tput::NAME,
            CommandMethods::new(tput::execute).with_completer(tput::completer),
        )?
        .command(testkey::NAME, CommandMethods::new(testkey::execute))?
        .command(clear::NAME, CommandMethods::new(clear::execute))?
        .alias("cls", clear::NAME)
}

/// Providers in precedence order.
pub fn default_providers() -> ShellResult<Vec<Arc<dyn CommandProvider>>> {
    let providers: Vec<Arc<dyn CommandProvider>> = vec![
        Arc::new(builtin_provider()?),
        Arc::new(terminal_provider()?),
    ];
    Ok(providers)
}

/// First argument completes to a command name, looked up when asked.
fn command_name_completer(_name: &str, sources: &CompletionSources) -> Box<dyn WordCompleter> {
    let commands = Arc::clone(&sources.commands);
    Box::new(ArgumentCompleter::new(vec![
        Box::new(NullCompleter),
        Box::new(OptionCompleter::new(
            Box::new(StringsCompleter::lazy(move || commands())),
            Arc::clone(&sources.options),
            1,
        )),
    ]))
}

fn io_result(command: &str, result: io::Result<()>) -> CommandResult {
    match result {
        Ok(()) => CommandResult::Value(None),
        Err(e) => CommandResult::Error(ShellError::command(command, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::help::HelpDescriptor;

    #[test]
    fn test_every_command_answers_help() {
        for provider in default_providers().unwrap() {
            for name in provider.command_names() {
                let text = provider.usage_text(&name).unwrap();
                let desc = HelpDescriptor::parse(&text);
                assert!(!desc.usage.is_empty(), "{name} has no usage line");
                assert!(desc.find_option("--help").is_some(), "{name} lacks --help");
                assert!(desc.find_option("-?").is_some(), "{name} lacks -?");
            }
        }
    }

    #[test]
    fn test_aliases_point_at_names() {
        for provider in default_providers().unwrap() {
            let names = provider.command_names();
            for (alias, target) in provider.command_aliases() {
                assert!(names.contains(&target), "{alias} -> {target}");
                assert!(provider.has_command(&alias));
            }
        }
    }
}

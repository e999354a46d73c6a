// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// help built-in command
use clap::{Arg, Command};
use std::fmt::Write;

use crate::commands::{CommandContext, CommandResult};
use crate::error::ShellError;
use crate::help::{parse_args, usage_command};
use crate::registry::CommandIndex;

pub const NAME: &str = "help";

mod options {
    pub const COMMAND: &str = "COMMAND";
}

pub fn sg_app() -> Command {
    usage_command(NAME, "list commands or show the usage of one", "help [COMMAND]")
        .arg(Arg::new(options::COMMAND))
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    let matches = match parse_args(sg_app(), args).into_matches(NAME) {
        Ok(m) => m,
        Err(result) => return result,
    };
    let Some(index) = ctx.index else {
        return CommandResult::Error(ShellError::command(NAME, "no commands registered"));
    };
    if let Some(command) = matches.get_one::<String>(options::COMMAND) {
        return match index.usage_text(command) {
            Some(text) => CommandResult::HelpRequested(text),
            None => CommandResult::Error(ShellError::command(
                NAME,
                format!("no such command: {command}"),
            )),
        };
    }
    super::io_result(NAME, ctx.terminal.write_str(&listing(index)))
}

/// One section per provider: name, synopsis and aliases of each command.
fn listing(index: &CommandIndex) -> String {
    let mut out = String::new();
    for provider in index.providers() {
        let names = provider.command_names();
        let aliases = provider.command_aliases();
        let width = names.iter().map(String::len).max().unwrap_or(0);
        let _ = writeln!(out, "{}:", provider.provider_name());
        for name in &names {
            let synopsis = provider
                .command_description(name)
                .map(|desc| desc.synopsis)
                .unwrap_or_default();
            let mut alias_names: Vec<&str> = aliases
                .iter()
                .filter(|(_, target)| *target == name)
                .map(|(alias, _)| alias.as_str())
                .collect();
            alias_names.sort_unstable();
            let _ = write!(out, "  {name:<width$}  {synopsis}");
            if !alias_names.is_empty() {
                let _ = write!(out, " (alias: {})", alias_names.join(", "));
            }
            out.push('\n');
        }
    }
    out.push_str("\nquit, exit  leave the shell\n");
    out
}

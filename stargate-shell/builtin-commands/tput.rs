// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// tput built-in command
use clap::{Arg, ArgAction, Command};
use std::sync::Arc;

use crate::commands::{CommandContext, CommandResult};
use crate::completers::{
    ArgumentCompleter, CompletionSources, NullCompleter, OptionCompleter, StringsCompleter,
    WordCompleter,
};
use crate::help::{parse_args, usage_command};
use crate::terminal::Capability;

pub const NAME: &str = "tput";
const USAGE: &str = "tput [CAPABILITY]";

mod options {
    pub const CAPABILITY: &str = "CAPABILITY";
}

pub fn sg_app() -> Command {
    usage_command(NAME, "put terminal capability", USAGE).arg(
        Arg::new(options::CAPABILITY)
            .action(ArgAction::Append)
            .num_args(0..),
    )
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    let matches = match parse_args(sg_app(), args).into_matches(NAME) {
        Ok(m) => m,
        Err(result) => return result,
    };
    let capabilities: Vec<&String> = matches
        .get_many::<String>(options::CAPABILITY)
        .map(|values| values.collect())
        .unwrap_or_default();

    let written = match capabilities.as_slice() {
        [name] => match Capability::by_name(name) {
            Some(capability) => ctx.terminal.puts(capability),
            None => ctx.terminal.println("Unknown capability"),
        },
        _ => ctx.terminal.println(&format!("Usage: {USAGE}")),
    };
    super::io_result(NAME, written.and_then(|()| ctx.terminal.flush()))
}

/// Capability names after the command word, listed when asked.
pub fn completer(_name: &str, sources: &CompletionSources) -> Box<dyn WordCompleter> {
    Box::new(ArgumentCompleter::new(vec![
        Box::new(NullCompleter),
        Box::new(OptionCompleter::new(
            Box::new(StringsCompleter::lazy(Capability::names)),
            Arc::clone(&sources.options),
            1,
        )),
    ]))
}

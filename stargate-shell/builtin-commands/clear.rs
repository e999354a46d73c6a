// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// clear built-in command
use clap::Command;

use crate::commands::{CommandContext, CommandResult};
use crate::error::ShellError;
use crate::help::{parse_args, usage_command};
use crate::terminal::Capability;

pub const NAME: &str = "clear";

pub fn sg_app() -> Command {
    usage_command(NAME, "clear terminal", "clear")
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    if let Err(result) = parse_args(sg_app(), args).into_matches(NAME) {
        return result;
    }
    let Some(clear_screen) = Capability::by_name("clear_screen") else {
        return CommandResult::Error(ShellError::command(NAME, "terminal cannot clear the screen"));
    };
    let written = ctx.terminal.puts(clear_screen).and_then(|()| ctx.terminal.flush());
    super::io_result(NAME, written)
}

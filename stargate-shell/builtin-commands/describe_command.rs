// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// describe built-in command
use clap::{Arg, Command};
use serde_json::{Value, json};

use crate::commands::{CommandContext, CommandResult};
use crate::error::ShellError;
use crate::help::{HelpDescriptor, parse_args, usage_command};

pub const NAME: &str = "describe";

mod options {
    pub const COMMAND: &str = "COMMAND";
}

pub fn sg_app() -> Command {
    usage_command(NAME, "show the structured description of a command", "describe COMMAND")
        .arg(Arg::new(options::COMMAND).required(true))
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    let matches = match parse_args(sg_app(), args).into_matches(NAME) {
        Ok(m) => m,
        Err(result) => return result,
    };
    let Some(command) = matches.get_one::<String>(options::COMMAND) else {
        return CommandResult::Error(ShellError::command(NAME, "requires a command name"));
    };
    match ctx.index.and_then(|index| index.describe(command)) {
        Some(desc) => CommandResult::Value(Some(descriptor_value(&desc))),
        None => CommandResult::Error(ShellError::command(
            NAME,
            format!("no such command: {command}"),
        )),
    }
}

fn descriptor_value(desc: &HelpDescriptor) -> Value {
    let options: Vec<Value> = desc
        .options
        .iter()
        .map(|o| {
            json!({
                "flag": o.flag,
                "aliases": o.aliases,
                "description": o.description,
            })
        })
        .collect();
    json!({
        "name": desc.name,
        "synopsis": desc.synopsis,
        "usage": desc.usage,
        "arguments": desc.arguments,
        "options": options,
    })
}

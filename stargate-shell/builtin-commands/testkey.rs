// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// testkey built-in command
use clap::Command;

use crate::commands::{CommandContext, CommandResult};
use crate::help::{parse_args, usage_command};

pub const NAME: &str = "testkey";
const PROMPT: &str = "Input the key event(Enter to complete): ";

pub fn sg_app() -> Command {
    usage_command(NAME, "display key events", "testkey")
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    if let Err(result) = parse_args(sg_app(), args).into_matches(NAME) {
        return result;
    }
    let keys = ctx
        .terminal
        .write_str(PROMPT)
        .and_then(|()| ctx.terminal.flush())
        .and_then(|()| ctx.terminal.read_key_sequence());
    let written = keys.and_then(|keys| ctx.terminal.println(&keys));
    super::io_result(NAME, written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::JsonEvaluator;
    use crate::terminal::MemoryTerminal;

    #[test]
    fn test_echoes_key_sequence() {
        let mut terminal = MemoryTerminal::new();
        terminal.push_keys("C-a Up x");
        let evaluator = JsonEvaluator::new();
        let result = execute(
            &[],
            &mut CommandContext {
                terminal: &mut terminal,
                evaluator: &evaluator,
                index: None,
            },
        );
        assert!(matches!(result, CommandResult::Value(None)));
        assert_eq!(terminal.output(), format!("{PROMPT}C-a Up x\n"));
    }

    #[test]
    fn test_missing_input_is_a_command_error() {
        let mut terminal = MemoryTerminal::new();
        let evaluator = JsonEvaluator::new();
        let result = execute(
            &[],
            &mut CommandContext {
                terminal: &mut terminal,
                evaluator: &evaluator,
                index: None,
            },
        );
        assert!(result.is_error());
    }
}

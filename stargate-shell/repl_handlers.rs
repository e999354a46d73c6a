// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use log::debug;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};
use serde_json::Value;
use std::io::{self, BufRead};

use crate::commands::CommandResult;
use crate::error::ShellError;
use crate::evaluator::Evaluator;
use crate::help::highlight_usage;
use crate::parsing::{LineParser, ParseContext, ParseError};
use crate::session::Session;
use crate::terminal::Terminal;
use crate::theme::Theme;

/// Where the driver gets its lines from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError>;
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.readline(prompt)
    }
}

/// Lines from a reader, e.g. piped stdin. Prompts are not shown.
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<String, ReadlineError> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(ReadlineError::Eof),
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(line)
            }
            Err(e) => Err(ReadlineError::Io(e)),
        }
    }
}

/// Collect input until every bracket of `first_line` is closed.
///
/// `secondary` builds the continuation prompt from the closers still
/// missing. Lines are joined with `\n`.
pub fn collect_multiline_input<F>(
    source: &mut dyn LineSource,
    parser: &LineParser,
    first_line: String,
    secondary: F,
) -> Result<String, ReadlineError>
where
    F: Fn(&str) -> String,
{
    let mut buffer = first_line;
    while let Err(ParseError::Incomplete { missing }) =
        parser.parse(&buffer, buffer.len(), ParseContext::AcceptLine)
    {
        debug!("continuation, missing {missing}");
        let line = source.read_line(&secondary(&missing))?;
        buffer.push('\n');
        buffer.push_str(&line);
    }
    Ok(buffer)
}

/// Render a command or evaluator result and update the session.
pub fn handle_result(
    result: CommandResult,
    terminal: &mut dyn Terminal,
    session: &mut Session,
    evaluator: &mut dyn Evaluator,
    theme: &Theme,
) -> io::Result<()> {
    match result {
        CommandResult::HelpRequested(text) => terminal.write_str(&highlight_usage(&text, theme)),
        CommandResult::Value(None) => Ok(()),
        CommandResult::Value(Some(value)) => terminal.println(&format_value(&value)),
        CommandResult::Error(ShellError::Interrupted) => Ok(()),
        CommandResult::Error(error) => {
            let printed = terminal.println(&theme.error(&error.to_string()));
            session.record_error(error, evaluator);
            printed
        }
    }
}

/// Strings print raw, everything else as pretty JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::JsonEvaluator;
    use crate::session::EXCEPTION_VAR;
    use crate::terminal::MemoryTerminal;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_buf_read_source() {
        let mut source = BufReadSource::new(Cursor::new("one\r\ntwo"));
        assert_eq!(source.read_line("> ").unwrap(), "one");
        assert_eq!(source.read_line("> ").unwrap(), "two");
        assert!(matches!(source.read_line("> "), Err(ReadlineError::Eof)));
    }

    #[test]
    fn test_multiline_until_balanced() {
        let mut source = BufReadSource::new(Cursor::new("\"a\": [1,\n2]}\nleft over\n"));
        let prompts = std::cell::RefCell::new(Vec::new());
        let line = collect_multiline_input(&mut source, &LineParser::new(), "x = {".to_string(), |m| {
            prompts.borrow_mut().push(m.to_string());
            format!("{m} > ")
        })
        .unwrap();
        assert_eq!(line, "x = {\n\"a\": [1,\n2]}");
        assert_eq!(prompts.into_inner(), vec!["}", "]}"]);
    }

    #[test]
    fn test_error_is_printed_and_recorded() {
        let mut terminal = MemoryTerminal::new();
        let mut session = Session::new();
        let mut evaluator = JsonEvaluator::new();
        let result = CommandResult::Error(ShellError::command("tput", "boom"));
        handle_result(result, &mut terminal, &mut session, &mut evaluator, &Theme::plain()).unwrap();
        assert_eq!(terminal.output(), "tput: boom\n");
        assert!(session.last_error().is_some());
        assert_eq!(evaluator.get(EXCEPTION_VAR).unwrap()["kind"], "command");
    }

    #[test]
    fn test_interrupt_is_silent() {
        let mut terminal = MemoryTerminal::new();
        let mut session = Session::new();
        let mut evaluator = JsonEvaluator::new();
        let result = CommandResult::Error(ShellError::Interrupted);
        handle_result(result, &mut terminal, &mut session, &mut evaluator, &Theme::plain()).unwrap();
        assert!(terminal.output().is_empty());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_values() {
        assert_eq!(format_value(&json!("plain")), "plain");
        assert_eq!(format_value(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! The read / parse / dispatch / render loop.

use log::{debug, warn};
use rustyline::error::ReadlineError;

use crate::command_type::CommandType;
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::parsing::{LineParser, ParseContext};
use crate::registry::Registry;
use crate::repl_handlers::{LineSource, collect_multiline_input, handle_result};
use crate::session::Session;
use crate::terminal::Terminal;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    registry: Registry,
    session: Session,
    parser: LineParser,
    prompt: String,
    secondary_pattern: String,
    theme: Theme,
}

impl Repl {
    pub fn new(registry: Registry, config: &ShellConfig) -> Self {
        Self {
            registry,
            session: Session::new(),
            parser: LineParser::new(),
            prompt: config.prompt.clone(),
            secondary_pattern: config.secondary_prompt.clone(),
            theme: config.theme(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Loop until quit or end of input.
    pub fn run(&mut self, input: &mut dyn LineSource, terminal: &mut dyn Terminal) -> ShellResult<()> {
        loop {
            self.session.begin_iteration(self.registry.evaluator_mut());
            let line = match self.read_logical_line(input) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            if self.step(&line, terminal) == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn read_logical_line(&self, input: &mut dyn LineSource) -> Result<String, ReadlineError> {
        let first = input.read_line(&self.prompt)?;
        collect_multiline_input(input, &self.parser, first, |missing| {
            self.secondary_prompt(missing)
        })
    }

    /// Handle one complete logical line.
    pub fn step(&mut self, line: &str, terminal: &mut dyn Terminal) -> Flow {
        let line = line.trim();
        match CommandType::detect(line) {
            CommandType::Quit => return Flow::Quit,
            CommandType::Empty => return Flow::Continue,
            CommandType::Dispatch => {}
        }
        let parsed = match self.parser.parse(line, line.len(), ParseContext::AcceptLine) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("not dispatching: {e}");
                return Flow::Continue;
            }
        };
        let result = self.registry.dispatch(&parsed, terminal);
        let rendered = handle_result(
            result,
            terminal,
            &mut self.session,
            self.registry.evaluator_mut(),
            &self.theme,
        )
        .and_then(|()| terminal.flush());
        if let Err(e) = rendered {
            warn!("cannot write to terminal: {e}");
        }
        Flow::Continue
    }

    /// Expand the continuation prompt pattern for the given missing
    /// closers, padded to the width of the primary prompt.
    pub fn secondary_prompt(&self, missing: &str) -> String {
        let expanded = self.secondary_pattern.replace("%M", missing);
        let visible = expanded.replace("%P", "").chars().count();
        let padding = self.prompt.chars().count().saturating_sub(visible);
        expanded.replace("%P", &" ".repeat(padding))
    }
}

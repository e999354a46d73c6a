// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// Per-iteration REPL state

use crate::error::ShellError;
use crate::evaluator::Evaluator;

/// Name under which the last failure is visible to the evaluator.
pub const EXCEPTION_VAR: &str = "exception";
/// Scratch bindings dropped at the top of every iteration.
pub const SCRATCH_PATTERN: &str = "_*";

#[derive(Debug, Default)]
pub struct Session {
    last_error: Option<ShellError>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset scratch state before reading the next line.
    ///
    /// The `exception` binding survives exactly one iteration: it is kept
    /// while the error that set it is still in the slot, and dropped at the
    /// start of the following iteration.
    pub fn begin_iteration(&mut self, evaluator: &mut dyn Evaluator) {
        evaluator.clear(SCRATCH_PATTERN);
        if self.last_error.take().is_none() {
            evaluator.clear(EXCEPTION_VAR);
        }
    }

    pub fn record_error(&mut self, error: ShellError, evaluator: &mut dyn Evaluator) {
        evaluator.bind(EXCEPTION_VAR, error.to_value());
        self.last_error = Some(error);
    }

    pub fn last_error(&self) -> Option<&ShellError> {
        self.last_error.as_ref()
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use rustyline::error::ReadlineError;
use serde_json::{Value, json};
use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Ctrl-C while a command or the evaluator was running.
    #[error("interrupted")]
    Interrupted,

    /// Bad arguments for a command, as reported by clap.
    #[error("{command}: {message}")]
    Usage { command: String, message: String },

    /// A command ran and failed.
    #[error("{command}: {message}")]
    Command { command: String, message: String },

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("cannot evaluate '{input}': {message}")]
    Eval { input: String, message: String },

    #[error("alias '{alias}' points at '{target}', which is not a command of provider '{provider}'")]
    InvalidAlias {
        provider: String,
        alias: String,
        target: String,
    },

    #[error("provider '{provider}' registers '{name}' twice")]
    DuplicateCommand { provider: String, name: String },

    #[error("{0}")]
    Startup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

impl ShellError {
    pub fn command(command: &str, message: impl Into<String>) -> Self {
        Self::Command {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Interrupted => "interrupted",
            Self::Usage { .. } => "usage",
            Self::Command { .. } => "command",
            Self::UnknownVariable(_) => "unknown-variable",
            Self::Eval { .. } => "eval",
            Self::InvalidAlias { .. } => "invalid-alias",
            Self::DuplicateCommand { .. } => "duplicate-command",
            Self::Startup(_) => "startup",
            Self::Io(_) => "io",
            Self::Readline(_) => "readline",
        }
    }

    /// The form stored in the evaluator namespace after a failed line.
    pub fn to_value(&self) -> Value {
        json!({
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}

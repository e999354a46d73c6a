// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! `stargate-shell`: an interactive shell that dispatches lines to command
//! providers, completes from their usage text and shows tailtips while
//! typing.

pub mod command_type;
pub mod commands;
pub mod completers;
pub mod completion;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod help;
pub mod parsing;
pub mod registry;
pub mod repl;
pub mod repl_handlers;
pub mod session;
pub mod tailtip;
pub mod terminal;
pub mod theme;

#[path = "builtin-commands/mod.rs"]
pub mod builtin_commands;

use crate::completion::StargateCompletion;
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::evaluator::JsonEvaluator;
use crate::registry::Registry;
use crate::tailtip::TailTip;

/// Builtins and terminal commands in front of a [`JsonEvaluator`].
pub fn default_registry() -> ShellResult<Registry> {
    Ok(Registry::new(
        builtin_commands::default_providers()?,
        Box::new(JsonEvaluator::new()),
    ))
}

/// Line editor helper for `registry`: compiled completers plus tailtip.
pub fn editor_helper(registry: &Registry, config: &ShellConfig) -> StargateCompletion {
    let tailtip = TailTip::new(registry.index().clone(), config.tip_style, config.tip_lines);
    tailtip.set_enabled(config.tailtip);
    StargateCompletion::new(registry.compile_completers(), tailtip, config.theme())
}

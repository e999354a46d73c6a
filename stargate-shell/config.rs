// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Command-line configuration of the shell itself.

use clap::{Arg, ArgAction, ArgMatches, Command, crate_version, value_parser};
use std::ffi::OsString;
use std::io::{self, IsTerminal};

use crate::tailtip::TipStyle;
use crate::theme::{DEFAULT_THEME, Theme};

pub const DEFAULT_PROMPT: &str = "stargate> ";
/// `%M`: missing closing brackets, `%P`: padding to the primary prompt width.
pub const SECONDARY_PROMPT_PATTERN: &str = "%M%P > ";
pub const DEFAULT_TIP_LINES: usize = 5;

pub mod options {
    pub const PROMPT: &str = "prompt";
    pub const TIP_STYLE: &str = "tip-style";
    pub const NO_TAILTIP: &str = "no-tailtip";
    pub const TIP_LINES: &str = "tip-lines";
    pub const NO_COLOR: &str = "no-color";
}

pub fn sg_app() -> Command {
    Command::new("stargate-shell")
        .version(crate_version!())
        .about("Interactive command shell with completion and command tailtips")
        .arg(
            Arg::new(options::PROMPT)
                .long(options::PROMPT)
                .value_name("TEXT")
                .default_value(DEFAULT_PROMPT)
                .help("Primary prompt"),
        )
        .arg(
            Arg::new(options::TIP_STYLE)
                .long(options::TIP_STYLE)
                .value_parser(["completer", "panel"])
                .default_value("completer")
                .help("Show tailtips inline or as a panel below the line"),
        )
        .arg(
            Arg::new(options::NO_TAILTIP)
                .long(options::NO_TAILTIP)
                .action(ArgAction::SetTrue)
                .help("Start with tailtips off (toggle with Alt-s)"),
        )
        .arg(
            Arg::new(options::TIP_LINES)
                .long(options::TIP_LINES)
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("5")
                .help("Maximum lines of the tailtip panel"),
        )
        .arg(
            Arg::new(options::NO_COLOR)
                .long(options::NO_COLOR)
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub secondary_prompt: String,
    pub tip_style: TipStyle,
    pub tailtip: bool,
    pub tip_lines: usize,
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            secondary_prompt: SECONDARY_PROMPT_PATTERN.to_string(),
            tip_style: TipStyle::Completer,
            tailtip: true,
            tip_lines: DEFAULT_TIP_LINES,
            color: false,
        }
    }
}

impl ShellConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let color = !matches.get_flag(options::NO_COLOR)
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal();
        Self {
            prompt: matches
                .get_one::<String>(options::PROMPT)
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            secondary_prompt: SECONDARY_PROMPT_PATTERN.to_string(),
            tip_style: matches
                .get_one::<String>(options::TIP_STYLE)
                .and_then(|s| TipStyle::from_name(s))
                .unwrap_or(TipStyle::Completer),
            tailtip: !matches.get_flag(options::NO_TAILTIP),
            tip_lines: matches
                .get_one::<usize>(options::TIP_LINES)
                .copied()
                .unwrap_or(DEFAULT_TIP_LINES),
            color,
        }
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        sg_app()
            .try_get_matches_from(args)
            .map(|matches| Self::from_matches(&matches))
    }

    pub fn theme(&self) -> Theme {
        if self.color {
            DEFAULT_THEME
        } else {
            Theme::plain()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::try_from_args(["stargate-shell", "--no-color"]).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.theme(), Theme::plain());
    }

    #[test]
    fn test_overrides() {
        let config = ShellConfig::try_from_args([
            "stargate-shell",
            "--prompt",
            "sg> ",
            "--tip-style",
            "panel",
            "--tip-lines",
            "3",
            "--no-tailtip",
        ])
        .unwrap();
        assert_eq!(config.prompt, "sg> ");
        assert_eq!(config.tip_style, TipStyle::Panel);
        assert_eq!(config.tip_lines, 3);
        assert!(!config.tailtip);
    }

    #[test]
    fn test_color_uses_default_theme() {
        let config = ShellConfig {
            color: true,
            ..ShellConfig::default()
        };
        assert_eq!(config.theme(), DEFAULT_THEME);
    }

    #[test]
    fn test_rejects_unknown_style() {
        assert!(ShellConfig::try_from_args(["stargate-shell", "--tip-style", "fancy"]).is_err());
    }
}

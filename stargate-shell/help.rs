// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Usage text for commands, and its structured form.
//!
//! Every command declares its usage once, as a clap [`Command`]. The rendered
//! text is what `--help` prints; [`HelpDescriptor::parse`] turns the same text
//! back into the structure used by completion and tailtips, so the printed
//! and structured views cannot drift apart.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::commands::CommandResult;
use crate::error::ShellError;
use crate::theme::Theme;

pub const HELP: &str = "help";
pub const HELP_FLAGS: [&str; 2] = ["-?", "--help"];

const USAGE_TEMPLATE: &str = "{name} -  {about}\nUsage: {usage}\n{options}";

/// Start a clap command with the shell's usage layout and the `-?/--help`
/// flag every command must accept.
pub fn usage_command(name: &'static str, about: &'static str, usage: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .override_usage(usage)
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .help_template(USAGE_TEMPLATE)
        .arg(
            Arg::new(HELP)
                .short('?')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Displays command help"),
        )
}

pub fn is_help_request(args: &[String]) -> bool {
    args.iter().any(|a| HELP_FLAGS.contains(&a.as_str()))
}

/// Outcome of matching a command's arguments.
pub enum Parsed {
    Matches(ArgMatches),
    Help(String),
    Invalid(String),
}

impl Parsed {
    /// Matches, or the result the command should return right away.
    pub fn into_matches(self, command: &str) -> Result<ArgMatches, CommandResult> {
        match self {
            Self::Matches(matches) => Ok(matches),
            Self::Help(text) => Err(CommandResult::HelpRequested(text)),
            Self::Invalid(message) => Err(CommandResult::Error(ShellError::Usage {
                command: command.to_string(),
                message,
            })),
        }
    }
}

/// Check for the help flag first, then hand the arguments to clap.
pub fn parse_args(mut app: Command, args: &[String]) -> Parsed {
    if is_help_request(args) {
        return Parsed::Help(render_usage(&mut app));
    }
    match app.try_get_matches_from_mut(args) {
        Ok(matches) => Parsed::Matches(matches),
        Err(e) => {
            let rendered = e.render().to_string();
            let message = rendered.lines().next().unwrap_or_default();
            Parsed::Invalid(message.trim_start_matches("error: ").to_string())
        }
    }
}

pub fn render_usage(app: &mut Command) -> String {
    app.render_help().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Preferred spelling, the long form when there is one.
    pub flag: String,
    pub aliases: Vec<String>,
    pub description: String,
}

impl OptionDescriptor {
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.flag.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let (flags, description) = match trimmed.find("  ") {
            Some(i) => (&trimmed[..i], trimmed[i..].trim()),
            None => (trimmed, ""),
        };
        let mut spellings: Vec<String> = flags
            .split([',', ' '])
            .filter(|f| f.starts_with('-'))
            .map(|f| f.split(['=', '[', '<']).next().unwrap_or(f).to_string())
            .filter(|f| f.len() > 1)
            .collect();
        let primary = spellings
            .iter()
            .position(|f| f.starts_with("--"))
            .unwrap_or(0);
        if spellings.is_empty() {
            return None;
        }
        let flag = spellings.remove(primary);
        Some(Self {
            flag,
            aliases: spellings,
            description: description.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpDescriptor {
    pub name: String,
    /// One-line description from the header.
    pub synopsis: String,
    /// `Usage:` lines with the prefix removed.
    pub usage: Vec<String>,
    /// Argument placeholders from the first usage line, e.g. `[CAPABILITY]`.
    pub arguments: Vec<String>,
    pub options: Vec<OptionDescriptor>,
}

impl HelpDescriptor {
    pub fn parse(text: &str) -> Self {
        let mut desc = Self::default();
        let mut lines = text.lines().filter(|l| !l.trim().is_empty()).peekable();

        if let Some(header) = lines.next_if(|l| !is_usage_line(l) && !is_option_line(l)) {
            match header.split_once(" - ") {
                Some((name, synopsis)) => {
                    desc.name = name.trim().to_string();
                    desc.synopsis = synopsis.trim().to_string();
                }
                None => desc.synopsis = header.trim().to_string(),
            }
        }

        let mut in_option = false;
        for line in lines {
            if is_usage_line(line) {
                let usage = line.trim_start()["Usage:".len()..].trim().to_string();
                desc.usage.push(usage);
                in_option = false;
            } else if is_option_line(line) {
                if let Some(opt) = OptionDescriptor::parse(line) {
                    desc.options.push(opt);
                    in_option = true;
                }
            } else if in_option && line.starts_with(char::is_whitespace) {
                // wrapped option description
                if let Some(opt) = desc.options.last_mut() {
                    if !opt.description.is_empty() {
                        opt.description.push(' ');
                    }
                    opt.description.push_str(line.trim());
                }
            }
        }

        if let Some(first) = desc.usage.first() {
            let mut words = first.split_whitespace();
            let command = words.next().unwrap_or_default();
            if desc.name.is_empty() {
                desc.name = command.to_string();
            }
            desc.arguments = words.map(str::to_string).collect();
        }
        desc
    }

    /// Lines describing the command, as shown by `describe` and the tailtip
    /// panel.
    pub fn info(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.synopsis.is_empty() {
            out.push(self.synopsis.clone());
        }
        out.extend(self.usage.iter().map(|u| format!("Usage: {u}")));
        out
    }

    pub fn find_option(&self, word: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.flags().any(|f| f == word))
    }
}

fn is_usage_line(line: &str) -> bool {
    line.trim_start().starts_with("Usage:")
}

fn is_argument_placeholder(word: &str) -> bool {
    word.starts_with('[')
        || (!word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase() || c == '_'))
}

fn is_option_line(line: &str) -> bool {
    line.starts_with(char::is_whitespace) && line.trim_start().starts_with('-')
}

/// Style usage text for the terminal: header and `Usage:` as titles, flags
/// and argument placeholders colored.
pub fn highlight_usage(text: &str, theme: &Theme) -> String {
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i == 0 && !is_usage_line(line) {
            match line.split_once(" - ") {
                Some((name, rest)) => {
                    out.push_str(&theme.title(name));
                    out.push_str(" - ");
                    out.push_str(rest);
                }
                None => out.push_str(line),
            }
        } else if is_usage_line(line) {
            let indent = &line[..line.len() - line.trim_start().len()];
            let rest = &line.trim_start()["Usage:".len()..];
            out.push_str(indent);
            out.push_str(&theme.title("Usage:"));
            for (j, word) in rest.split(' ').enumerate() {
                if j > 0 {
                    out.push(' ');
                }
                if is_argument_placeholder(word) {
                    out.push_str(&theme.argument(word));
                } else {
                    out.push_str(word);
                }
            }
        } else if is_option_line(line) {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            let split = trimmed.find("  ").unwrap_or(trimmed.len());
            out.push_str(indent);
            out.push_str(&theme.option(&trimmed[..split]));
            out.push_str(&trimmed[split..]);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// Tab completion and tailtips for the line editor
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

use crate::completers::{Candidate, SystemCompleter};
use crate::parsing::{LineParser, ParseContext};
use crate::tailtip::{TailTip, TailTipHint, ToggleTailTip};
use crate::theme::Theme;

pub struct StargateCompletion {
    completer: SystemCompleter,
    tailtip: TailTip,
    parser: LineParser,
    theme: Theme,
}

impl StargateCompletion {
    pub fn new(completer: SystemCompleter, tailtip: TailTip, theme: Theme) -> Self {
        Self {
            completer,
            tailtip,
            parser: LineParser::new(),
            theme,
        }
    }

    pub fn toggle_handler(&self) -> ToggleTailTip {
        self.tailtip.toggle_handler()
    }

    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Candidate>) {
        match self.parser.parse(line, pos, ParseContext::Complete) {
            Ok(parsed) => (parsed.word_start, self.completer.complete(&parsed)),
            Err(_) => (pos, Vec::new()),
        }
    }

    /// Candidates as the editor shows and inserts them. A word opened with
    /// a quote keeps that quote around its replacement.
    pub fn pairs(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let Ok(parsed) = self.parser.parse(line, pos, ParseContext::Complete) else {
            return (pos, Vec::new());
        };
        let pairs = self
            .completer
            .complete(&parsed)
            .into_iter()
            .map(|c| to_pair(c, parsed.word_quote))
            .collect();
        (parsed.word_start, pairs)
    }
}

fn to_pair(candidate: Candidate, quote: Option<char>) -> Pair {
    let display = match &candidate.description {
        Some(description) => format!("{}  {description}", candidate.value),
        None => candidate.value.clone(),
    };
    let replacement = match quote {
        Some(q) => format!("{q}{}{q}", candidate.value),
        None => candidate.value,
    };
    Pair {
        display,
        replacement,
    }
}

impl Helper for StargateCompletion {}

impl Completer for StargateCompletion {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.pairs(line, pos))
    }
}

impl Hinter for StargateCompletion {
    type Hint = TailTipHint;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<TailTipHint> {
        self.tailtip.tip(line, pos)
    }
}

impl Highlighter for StargateCompletion {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if self.theme.hint_color.is_empty() {
            Cow::Borrowed(hint)
        } else {
            Cow::Owned(self.theme.hint(hint))
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        false
    }
}

impl Validator for StargateCompletion {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_commands::default_providers;
    use crate::evaluator::JsonEvaluator;
    use crate::registry::Registry;
    use crate::tailtip::TipStyle;

    fn helper() -> StargateCompletion {
        let registry = Registry::new(default_providers().unwrap(), Box::new(JsonEvaluator::new()));
        let tailtip = TailTip::new(registry.index().clone(), TipStyle::Completer, 5);
        StargateCompletion::new(registry.compile_completers(), tailtip, Theme::plain())
    }

    fn values(line: &str) -> (usize, Vec<String>) {
        let (start, candidates) = helper().candidates(line, line.len());
        (start, candidates.into_iter().map(|c| c.value).collect())
    }

    #[test]
    fn test_command_word() {
        let (start, values) = values("cl");
        assert_eq!(start, 0);
        assert_eq!(values, vec!["clear", "cls"]);
    }

    #[test]
    fn test_tput_capabilities() {
        let (start, values) = values("tput clear_s");
        assert_eq!(start, 5);
        assert_eq!(values, vec!["clear_screen"]);
    }

    #[test]
    fn test_help_flags_for_every_command() {
        let (_, values) = values("testkey -");
        assert_eq!(values, vec!["--help", "-?"]);
    }

    #[test]
    fn test_tput_capability_prefix() {
        let (start, values) = values("tput cl");
        assert_eq!(start, 5);
        assert!(values.contains(&"clear".to_string()));
        assert!(values.contains(&"clear_screen".to_string()));
    }

    #[test]
    fn test_tput_help_flags() {
        let (start, values) = values("tput -");
        assert_eq!(start, 5);
        assert_eq!(values, vec!["--help", "-?"]);
    }

    #[test]
    fn test_option_display_carries_description() {
        let (_, pairs) = helper().pairs("tput --", 7);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "--help");
        assert_eq!(pairs[0].display, "--help  Displays command help");
    }

    #[test]
    fn test_plain_candidate_displays_value() {
        let (_, pairs) = helper().pairs("tput clear_s", 12);
        assert_eq!(pairs[0].display, "clear_screen");
        assert_eq!(pairs[0].replacement, "clear_screen");
    }

    #[test]
    fn test_quoted_word_keeps_its_quote() {
        let line = "tput \"clear_s";
        let (start, pairs) = helper().pairs(line, line.len());
        assert_eq!(start, 5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "\"clear_screen\"");
        assert_eq!(pairs[0].display, "clear_screen");
    }

    #[test]
    fn test_plain_theme_leaves_hint_alone() {
        assert_eq!(helper().highlight_hint("SOURCE"), "SOURCE");
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Command hints shown after the cursor while typing.
//!
//! The hint is display-only: [`TailTipHint::completion`] is always `None`,
//! so accepting a hint never changes the buffer.

use rustyline::hint::Hint;
use rustyline::{Cmd, ConditionalEventHandler, Event, EventContext, RepeatCount};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::help::HelpDescriptor;
use crate::parsing::{LineParser, ParseContext, ParsedLine};
use crate::registry::CommandIndex;
use crate::terminal::screen_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipStyle {
    /// Remaining arguments or matching options on the input line.
    Completer,
    /// A few lines of description below the input line.
    Panel,
}

impl TipStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "completer" => Some(Self::Completer),
            "panel" => Some(Self::Panel),
            _ => None,
        }
    }
}

pub struct TailTipHint {
    display: String,
}

impl TailTipHint {
    pub fn new(display: String) -> Self {
        Self { display }
    }
}

impl Hint for TailTipHint {
    fn display(&self) -> &str {
        &self.display
    }

    fn completion(&self) -> Option<&str> {
        None
    }
}

pub struct TailTip {
    index: CommandIndex,
    parser: LineParser,
    style: TipStyle,
    max_lines: usize,
    /// Queried on every tip; the terminal may have been resized.
    width: Box<dyn Fn() -> usize>,
    enabled: Arc<AtomicBool>,
}

impl TailTip {
    pub fn new(index: CommandIndex, style: TipStyle, max_lines: usize) -> Self {
        Self {
            index,
            parser: LineParser::new(),
            style,
            max_lines,
            width: Box::new(screen_width),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Key handler flipping this tailtip on and off.
    pub fn toggle_handler(&self) -> ToggleTailTip {
        ToggleTailTip {
            enabled: Arc::clone(&self.enabled),
        }
    }

    /// Replace the terminal width lookup.
    pub fn with_width(mut self, width: impl Fn() -> usize + 'static) -> Self {
        self.width = Box::new(width);
        self
    }

    /// Hint for `line` with the cursor at byte `pos`, if any.
    pub fn tip(&self, line: &str, pos: usize) -> Option<TailTipHint> {
        if !self.is_enabled() || pos < line.len() {
            return None;
        }
        let parsed = self.parser.parse(line, pos, ParseContext::Complete).ok()?;
        if parsed.word_index == 0 {
            return None;
        }
        let desc = self.index.describe(parsed.command()?)?;
        let text = match self.style {
            TipStyle::Completer => inline_tip(&parsed, &desc),
            TipStyle::Panel => self.panel_tip(&parsed, &desc),
        };
        text.filter(|t| !t.trim().is_empty()).map(TailTipHint::new)
    }

    fn panel_tip(&self, parsed: &ParsedLine, desc: &HelpDescriptor) -> Option<String> {
        let mut lines = Vec::new();
        let prefix = parsed.word_prefix();
        if prefix.starts_with('-') {
            for option in &desc.options {
                if option.flags().any(|f| f.starts_with(prefix)) {
                    let flags: Vec<&str> = option.flags().collect();
                    lines.push(format!("{}  {}", flags.join(" "), option.description));
                }
            }
        } else {
            lines.extend(desc.info());
        }
        let mut out = inline_tip(parsed, desc).unwrap_or_default();
        let width = (self.width)().max(20);
        let wrapped = lines
            .iter()
            .flat_map(|l| textwrap::wrap(l, width))
            .take(self.max_lines);
        for line in wrapped {
            out.push('\n');
            out.push_str(&line);
        }
        Some(out)
    }
}

/// Remaining argument placeholders, or the options matching a `-` prefix.
fn inline_tip(parsed: &ParsedLine, desc: &HelpDescriptor) -> Option<String> {
    let prefix = parsed.word_prefix();
    let lead = if prefix.is_empty() { "" } else { " " };
    if prefix.starts_with('-') {
        let flags: Vec<&str> = desc
            .options
            .iter()
            .flat_map(|o| o.flags())
            .filter(|f| f.starts_with(prefix) && *f != prefix)
            .collect();
        return (!flags.is_empty()).then(|| format!("{lead}{}", flags.join(" ")));
    }
    let before = parsed
        .words
        .get(1..parsed.word_index)
        .unwrap_or_default()
        .iter()
        .filter(|w| !w.starts_with('-'))
        .count();
    let typed = before + usize::from(!prefix.is_empty());
    let remaining = desc.arguments.get(typed..).unwrap_or_default();
    (!remaining.is_empty()).then(|| format!("{lead}{}", remaining.join(" ")))
}

/// Bound to Alt-s.
pub struct ToggleTailTip {
    enabled: Arc<AtomicBool>,
}

impl ConditionalEventHandler for ToggleTailTip {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext,
    ) -> Option<Cmd> {
        self.enabled.fetch_xor(true, Ordering::Relaxed);
        Some(Cmd::Repaint)
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Terminal access for commands and the REPL driver.
//!
//! Capabilities are looked up by terminfo name (`clear_screen`) or capname
//! (`clear`) in a map generated by `build.rs`.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Write};

/// A named control sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub sequence: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/capability_map.rs"));

impl Capability {
    pub fn by_name(name: &str) -> Option<Self> {
        CAPABILITY_MAP.get(name).copied()
    }

    /// Every name the map answers to, long names and capnames alike.
    pub fn names() -> Vec<String> {
        CAPABILITY_MAP.keys().map(|k| (*k).to_string()).collect()
    }
}

pub trait Terminal {
    /// Human readable name of this terminal implementation.
    fn name(&self) -> &str;

    /// Terminal type, as in `$TERM`.
    fn kind(&self) -> &str;

    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Read key events until Enter and return their display form.
    fn read_key_sequence(&mut self) -> io::Result<String>;

    fn width(&self) -> usize {
        80
    }

    fn puts(&mut self, capability: Capability) -> io::Result<()> {
        self.write_str(capability.sequence)
    }

    fn println(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.write_str("\n")
    }
}

/// Stdout-backed terminal; key input goes through crossterm raw mode.
pub struct AnsiTerminal {
    kind: String,
    out: io::Stdout,
}

impl AnsiTerminal {
    pub fn new() -> Self {
        let kind = if io::stdout().is_terminal() {
            std::env::var("TERM").unwrap_or_else(|_| "ansi".to_string())
        } else {
            "dumb".to_string()
        };
        Self {
            kind,
            out: io::stdout(),
        }
    }
}

impl Default for AnsiTerminal {
    fn default() -> Self {
        Self::new()
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Terminal for AnsiTerminal {
    fn name(&self) -> &str {
        "stargate-shell"
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn read_key_sequence(&mut self) -> io::Result<String> {
        let mut keys = Vec::new();
        {
            let _raw = RawModeGuard::enter()?;
            loop {
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Enter && key.modifiers.is_empty() {
                    break;
                }
                keys.push(display_key(&key));
            }
        }
        Ok(keys.join(" "))
    }

    fn width(&self) -> usize {
        screen_width()
    }
}

/// Current column count of the controlling terminal, 80 when unknown.
pub fn screen_width() -> usize {
    terminal::size().map_or(80, |(cols, _)| usize::from(cols))
}

/// Emacs-style rendering of a key event: `C-a`, `M-x`, `Up`, `F5`.
pub fn display_key(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "SPC".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Esc => "ESC".to_string(),
        KeyCode::Tab => "TAB".to_string(),
        KeyCode::BackTab => "S-TAB".to_string(),
        KeyCode::Backspace => "DEL".to_string(),
        KeyCode::Enter => "RET".to_string(),
        other => format!("{other:?}"),
    };
    let mut prefix = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        prefix.push_str("C-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        prefix.push_str("M-");
    }
    if key.modifiers.contains(KeyModifiers::SUPER) {
        prefix.push_str("s-");
    }
    format!("{prefix}{base}")
}

/// Terminal that records everything written to it.
///
/// Used as the sink for help introspection, where commands must not touch
/// the real screen, and by tests.
#[derive(Debug, Default)]
pub struct MemoryTerminal {
    output: String,
    keys: VecDeque<String>,
    flushes: usize,
}

impl MemoryTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key sequence for the next `read_key_sequence` call.
    pub fn push_keys(&mut self, keys: &str) {
        self.keys.push_back(keys.to_string());
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Terminal for MemoryTerminal {
    fn name(&self) -> &str {
        "memory"
    }

    fn kind(&self) -> &str {
        "dumb"
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn read_key_sequence(&mut self) -> io::Result<String> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no key input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("clear_screen", "\x1b[H\x1b[2J")]
    #[case("clear", "\x1b[H\x1b[2J")]
    #[case("bel", "\x07")]
    #[case("cursor_up", "\x1b[A")]
    fn test_capability_lookup(#[case] name: &str, #[case] sequence: &str) {
        let cap = Capability::by_name(name).unwrap();
        assert_eq!(cap.sequence, sequence);
    }

    #[test]
    fn test_capname_resolves_to_long_name() {
        assert_eq!(Capability::by_name("smso").unwrap().name, "enter_standout_mode");
    }

    #[test]
    fn test_unknown_capability() {
        assert!(Capability::by_name("bogus-cap").is_none());
    }

    #[test]
    fn test_names_contain_both_spellings() {
        let names = Capability::names();
        assert!(names.iter().any(|n| n == "clear_screen"));
        assert!(names.iter().any(|n| n == "clear"));
    }

    #[test]
    fn test_display_key() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(display_key(&key), "C-a");
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(display_key(&key), "Up");
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(display_key(&key), "M-x");
    }

    #[test]
    fn test_memory_terminal_records_output() {
        let mut term = MemoryTerminal::new();
        term.puts(Capability::by_name("bel").unwrap()).unwrap();
        term.println("done").unwrap();
        term.flush().unwrap();
        assert_eq!(term.output(), "\x07done\n");
        assert_eq!(term.flushes(), 1);
        assert!(term.read_key_sequence().is_err());
    }
}

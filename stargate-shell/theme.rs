// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title_color: &'static str,
    pub option_color: &'static str,
    pub argument_color: &'static str,
    pub hint_color: &'static str,
    pub error_color: &'static str,
}

impl Theme {
    pub const fn default() -> Self {
        Self {
            title_color: "\x1b[1m",
            option_color: "\x1b[36m",
            argument_color: "\x1b[33m",
            hint_color: "\x1b[2m",
            error_color: "\x1b[31m",
        }
    }

    /// No escape sequences at all; used for dumb terminals and `NO_COLOR`.
    pub const fn plain() -> Self {
        Self {
            title_color: "",
            option_color: "",
            argument_color: "",
            hint_color: "",
            error_color: "",
        }
    }

    pub const fn reset() -> &'static str {
        "\x1b[0m"
    }

    fn paint(color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, Self::reset())
        }
    }

    pub fn title(&self, text: &str) -> String {
        Self::paint(self.title_color, text)
    }

    pub fn option(&self, text: &str) -> String {
        Self::paint(self.option_color, text)
    }

    pub fn argument(&self, text: &str) -> String {
        Self::paint(self.argument_color, text)
    }

    pub fn hint(&self, text: &str) -> String {
        Self::paint(self.hint_color, text)
    }

    pub fn error(&self, text: &str) -> String {
        Self::paint(self.error_color, text)
    }
}

pub const DEFAULT_THEME: Theme = Theme::default();

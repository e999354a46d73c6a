// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

/// Control words that end the session.
pub const QUIT_TOKENS: [&str; 2] = ["quit", "exit"];

/// Type of command input detected
#[derive(Debug, PartialEq)]
pub enum CommandType {
    Empty,
    Quit,
    Dispatch,
}

impl CommandType {
    /// Detect the type of command from input string
    pub fn detect(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Empty;
        }
        if Self::is_quit(input) {
            return Self::Quit;
        }
        Self::Dispatch
    }

    /// Exact match after trimming, any letter case.
    pub fn is_quit(input: &str) -> bool {
        let input = input.trim();
        QUIT_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("exit", CommandType::Quit)]
    #[case("  EXIT ", CommandType::Quit)]
    #[case("Quit", CommandType::Quit)]
    #[case("exit now", CommandType::Dispatch)]
    #[case("quitter", CommandType::Dispatch)]
    #[case("   ", CommandType::Empty)]
    #[case("tput bel", CommandType::Dispatch)]
    fn test_detect(#[case] input: &str, #[case] expected: CommandType) {
        assert_eq!(CommandType::detect(input), expected);
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

// Bracket-aware line parsing

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Curly,
    Round,
    Square,
}

impl Bracket {
    fn opening(ch: char) -> Option<Self> {
        match ch {
            '{' => Some(Self::Curly),
            '(' => Some(Self::Round),
            '[' => Some(Self::Square),
            _ => None,
        }
    }

    fn closing(ch: char) -> Option<Self> {
        match ch {
            '}' => Some(Self::Curly),
            ')' => Some(Self::Round),
            ']' => Some(Self::Square),
            _ => None,
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Self::Curly => '}',
            Self::Round => ')',
            Self::Square => ']',
        }
    }
}

/// Why the line is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    /// The user pressed Enter; open brackets ask for more input.
    AcceptLine,
    /// Completion or hints; never fails.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing closing {missing}")]
    Incomplete { missing: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line: String,
    pub words: Vec<String>,
    /// Index into `words` of the word under the cursor.
    pub word_index: usize,
    /// Length of the part of that word left of the cursor.
    pub word_cursor: usize,
    /// Byte offset in `line` where the word under the cursor starts.
    pub word_start: usize,
    /// Quote that opens the word under the cursor, if any.
    pub word_quote: Option<char>,
    pub cursor: usize,
    pub open_brackets: usize,
}

impl ParsedLine {
    pub fn command(&self) -> Option<&str> {
        self.words.first().map(String::as_str).filter(|w| !w.is_empty())
    }

    pub fn args(&self) -> &[String] {
        self.words.get(1..).unwrap_or(&[])
    }

    /// The part of the current word typed so far.
    pub fn word_prefix(&self) -> &str {
        self.words
            .get(self.word_index)
            .map_or("", |w| w.get(..self.word_cursor).unwrap_or(w))
    }
}

#[derive(Debug, Default)]
struct Tokens {
    /// (raw start offset, unquoted text)
    words: Vec<(usize, String)>,
    /// The text ended inside a word rather than on whitespace.
    in_word: bool,
    open: Vec<Bracket>,
}

fn tokenize(input: &str) -> Tokens {
    let mut tokens = Tokens::default();
    let mut current = String::new();
    let mut start = 0;
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in input.char_indices() {
        if !in_word && !ch.is_whitespace() {
            in_word = true;
            start = i;
        }
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if quote != Some('\'') => escaped = true,
            '"' | '\'' if quote.is_none() => quote = Some(ch),
            '"' | '\'' if quote == Some(ch) => quote = None,
            c if c.is_whitespace() && quote.is_none() => {
                if in_word {
                    tokens.words.push((start, std::mem::take(&mut current)));
                    in_word = false;
                }
            }
            c => {
                if quote.is_none() {
                    if let Some(bracket) = Bracket::opening(c) {
                        tokens.open.push(bracket);
                    } else if let Some(bracket) = Bracket::closing(c) {
                        if tokens.open.last() == Some(&bracket) {
                            tokens.open.pop();
                        }
                    }
                }
                current.push(c);
            }
        }
    }

    if in_word {
        tokens.words.push((start, current));
    }
    tokens.in_word = in_word;
    tokens
}

#[derive(Debug, Clone, Default)]
pub struct LineParser;

impl LineParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(
        &self,
        line: &str,
        cursor: usize,
        context: ParseContext,
    ) -> Result<ParsedLine, ParseError> {
        let cursor = cursor.min(line.len());
        let full = tokenize(line);

        if context == ParseContext::AcceptLine && !full.open.is_empty() {
            let missing = full.open.iter().rev().map(|b| b.close_char()).collect();
            return Err(ParseError::Incomplete { missing });
        }

        let prefix = tokenize(&line[..cursor]);
        let (word_index, word_cursor, word_start) = match prefix.words.last() {
            Some((start, text)) if prefix.in_word => {
                (prefix.words.len() - 1, text.len(), *start)
            }
            _ => (prefix.words.len(), 0, cursor),
        };

        let word_quote = line[word_start..cursor]
            .chars()
            .next()
            .filter(|c| matches!(c, '"' | '\''));

        let mut words: Vec<String> = full.words.into_iter().map(|(_, w)| w).collect();
        if word_index >= words.len() {
            words.push(String::new());
        } else if !prefix.in_word && line[cursor..].starts_with(char::is_whitespace) {
            // cursor sits on whitespace between two words
            words.insert(word_index, String::new());
        }

        Ok(ParsedLine {
            line: line.to_string(),
            words,
            word_index,
            word_cursor,
            word_start,
            word_quote,
            cursor,
            open_brackets: full.open.len(),
        })
    }
}

// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Word completers and the compiler that turns providers into one
//! [`SystemCompleter`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::commands::CommandProvider;
use crate::help::OptionDescriptor;
use crate::parsing::ParsedLine;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub value: String,
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }

    pub fn described(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: Some(description.into()),
        }
    }
}

pub trait WordCompleter {
    /// Append candidates for the word under the cursor.
    fn complete(&self, line: &ParsedLine, candidates: &mut Vec<Candidate>);
}

/// Options of a command, looked up by command name.
pub type OptionLister = Arc<dyn Fn(&str) -> Vec<OptionDescriptor>>;
/// Names of every command the shell knows.
pub type NameProducer = Arc<dyn Fn() -> Vec<String>>;

/// What a completer factory may draw on.
#[derive(Clone)]
pub struct CompletionSources {
    pub options: OptionLister,
    pub commands: NameProducer,
}

impl CompletionSources {
    pub fn empty() -> Self {
        Self {
            options: Arc::new(|_| Vec::new()),
            commands: Arc::new(Vec::new),
        }
    }
}

pub struct NullCompleter;

impl WordCompleter for NullCompleter {
    fn complete(&self, _line: &ParsedLine, _candidates: &mut Vec<Candidate>) {}
}

/// Completes from a word list, fixed or produced on demand.
pub struct StringsCompleter {
    source: Box<dyn Fn() -> Vec<String>>,
}

impl StringsCompleter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            source: Box::new(move || words.clone()),
        }
    }

    pub fn lazy(source: impl Fn() -> Vec<String> + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl WordCompleter for StringsCompleter {
    fn complete(&self, line: &ParsedLine, candidates: &mut Vec<Candidate>) {
        let prefix = line.word_prefix();
        candidates.extend(
            (self.source)()
                .into_iter()
                .filter(|w| w.starts_with(prefix))
                .map(Candidate::new),
        );
    }
}

/// One completer per word position; the last one covers every later word.
pub struct ArgumentCompleter {
    completers: Vec<Box<dyn WordCompleter>>,
}

impl ArgumentCompleter {
    pub fn new(completers: Vec<Box<dyn WordCompleter>>) -> Self {
        Self { completers }
    }
}

impl WordCompleter for ArgumentCompleter {
    fn complete(&self, line: &ParsedLine, candidates: &mut Vec<Candidate>) {
        let Some(last) = self.completers.len().checked_sub(1) else {
            return;
        };
        self.completers[line.word_index.min(last)].complete(line, candidates);
    }
}

/// Completes `-`-prefixed words from the command's options and hands
/// everything else to `values`.
pub struct OptionCompleter {
    values: Box<dyn WordCompleter>,
    options: OptionLister,
    start: usize,
}

impl OptionCompleter {
    pub fn new(values: Box<dyn WordCompleter>, options: OptionLister, start: usize) -> Self {
        Self {
            values,
            options,
            start,
        }
    }
}

impl WordCompleter for OptionCompleter {
    fn complete(&self, line: &ParsedLine, candidates: &mut Vec<Candidate>) {
        if line.word_index < self.start {
            return;
        }
        let prefix = line.word_prefix();
        if !prefix.starts_with('-') {
            self.values.complete(line, candidates);
            return;
        }
        let Some(command) = line.command() else {
            return;
        };
        let used = line
            .words
            .get(self.start..line.word_index)
            .unwrap_or_default();
        for option in (self.options)(command) {
            if option.flags().any(|f| used.iter().any(|u| u == f)) {
                continue;
            }
            candidates.extend(
                option
                    .flags()
                    .filter(|f| f.starts_with(prefix))
                    .map(|f| Candidate::described(f, option.description.as_str())),
            );
        }
    }
}

/// Completer for the whole line: command word from the table's keys, the
/// rest delegated to the entry for that command.
#[derive(Default)]
pub struct SystemCompleter {
    completers: BTreeMap<String, Arc<dyn WordCompleter>>,
    aliases: BTreeMap<String, String>,
}

impl SystemCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, completer: Arc<dyn WordCompleter>) {
        self.completers.insert(name.to_string(), completer);
    }

    /// Give every alias the completer of its target.
    pub fn add_aliases(&mut self, aliases: &HashMap<String, String>) {
        for (alias, target) in aliases {
            if let Some(completer) = self.completers.get(target).cloned() {
                self.completers.insert(alias.clone(), completer);
                self.aliases.insert(alias.clone(), target.clone());
            }
        }
    }

    /// Merge `other` in; its entries replace ours on conflict.
    pub fn merge(&mut self, other: Self) {
        self.completers.extend(other.completers);
        self.aliases.extend(other.aliases);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.completers.contains_key(name)
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.completers.keys().map(String::as_str)
    }

    pub fn complete(&self, line: &ParsedLine) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        if line.word_index == 0 {
            let prefix = line.word_prefix();
            candidates.extend(
                self.names()
                    .filter(|n| n.starts_with(prefix))
                    .map(Candidate::new),
            );
        } else if let Some(completer) = line.command().and_then(|c| self.completers.get(c)) {
            completer.complete(line, &mut candidates);
        }
        candidates.sort();
        candidates.dedup_by(|a, b| a.value == b.value);
        candidates
    }
}

/// `ArgumentCompleter[Null, OptionCompleter(Null, options, 1)]`
pub fn default_completer(options: OptionLister) -> Box<dyn WordCompleter> {
    Box::new(ArgumentCompleter::new(vec![
        Box::new(NullCompleter),
        Box::new(OptionCompleter::new(Box::new(NullCompleter), options, 1)),
    ]))
}

/// Build the completer table for one provider: one entry per command name
/// and per alias.
pub fn compile_provider(provider: &Arc<dyn CommandProvider>, commands: NameProducer) -> SystemCompleter {
    let source = Arc::clone(provider);
    let sources = CompletionSources {
        options: Arc::new(move |command: &str| source.command_options(command)),
        commands,
    };
    let mut compiled = SystemCompleter::new();
    for name in provider.command_names() {
        let completer = provider
            .command_completer(&name, &sources)
            .unwrap_or_else(|| default_completer(Arc::clone(&sources.options)));
        compiled.add(&name, Arc::from(completer));
    }
    compiled.add_aliases(&provider.command_aliases());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{LineParser, ParseContext};
    use pretty_assertions::assert_eq;

    fn at_end(line: &str) -> ParsedLine {
        LineParser::new()
            .parse(line, line.len(), ParseContext::Complete)
            .unwrap()
    }

    fn values(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.value.as_str()).collect()
    }

    fn help_options() -> OptionLister {
        Arc::new(|_| {
            vec![
                OptionDescriptor {
                    flag: "--help".to_string(),
                    aliases: vec!["-?".to_string()],
                    description: "Displays command help".to_string(),
                },
                OptionDescriptor {
                    flag: "--obj".to_string(),
                    aliases: vec!["-o".to_string()],
                    description: "JSON output".to_string(),
                },
            ]
        })
    }

    #[test]
    fn test_strings_completer_filters_by_prefix() {
        let completer = StringsCompleter::new(["clear", "clear_screen", "bel"]);
        let mut out = Vec::new();
        completer.complete(&at_end("tput cl"), &mut out);
        assert_eq!(values(&out), vec!["clear", "clear_screen"]);
    }

    #[test]
    fn test_argument_completer_repeats_last() {
        let completer = ArgumentCompleter::new(vec![
            Box::new(NullCompleter),
            Box::new(StringsCompleter::new(["x"])),
        ]);
        let mut out = Vec::new();
        completer.complete(&at_end("cmd a b "), &mut out);
        assert_eq!(values(&out), vec!["x"]);
    }

    #[test]
    fn test_option_completer_offers_flags() {
        let completer = OptionCompleter::new(Box::new(NullCompleter), help_options(), 1);
        let mut out = Vec::new();
        completer.complete(&at_end("vars --"), &mut out);
        assert_eq!(values(&out), vec!["--help", "--obj"]);
        assert_eq!(out[0].description.as_deref(), Some("Displays command help"));
    }

    #[test]
    fn test_option_completer_skips_used_options() {
        let completer = OptionCompleter::new(Box::new(NullCompleter), help_options(), 1);
        let mut out = Vec::new();
        completer.complete(&at_end("vars -o -"), &mut out);
        assert_eq!(values(&out), vec!["--help", "-?"]);
    }

    #[test]
    fn test_system_completer_command_word_and_aliases() {
        let mut system = SystemCompleter::new();
        system.add("clear", Arc::from(default_completer(help_options())));
        system.add("tput", Arc::new(StringsCompleter::new(["clear_screen"])));
        system.add_aliases(&HashMap::from([("cls".to_string(), "clear".to_string())]));

        assert!(system.contains("cls"));
        assert!(system.is_alias("cls"));
        assert_eq!(values(&system.complete(&at_end("cl"))), vec!["clear", "cls"]);
        assert_eq!(values(&system.complete(&at_end("cls --h"))), vec!["--help"]);
        assert_eq!(values(&system.complete(&at_end("tput "))), vec!["clear_screen"]);
        assert!(system.complete(&at_end("nope ")).is_empty());
    }

    #[test]
    fn test_default_completer_ignores_plain_words() {
        let completer = default_completer(help_options());
        let mut out = Vec::new();
        completer.complete(&at_end("clear x"), &mut out);
        assert!(out.is_empty());
    }
}

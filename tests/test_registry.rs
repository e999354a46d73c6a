// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::sync::Arc;

use stargate_shell::builtin_commands::{BUILTINS, TERMINAL, default_providers};
use stargate_shell::commands::{CommandContext, CommandProvider, CommandResult};
use stargate_shell::default_registry;
use stargate_shell::evaluator::JsonEvaluator;
use stargate_shell::help::HelpDescriptor;
use stargate_shell::terminal::MemoryTerminal;

fn help_result(provider: &Arc<dyn CommandProvider>, name: &str) -> (CommandResult, String) {
    let mut terminal = MemoryTerminal::new();
    let evaluator = JsonEvaluator::new();
    let result = provider.execute(
        name,
        &["--help".to_string()],
        &mut CommandContext {
            terminal: &mut terminal,
            evaluator: &evaluator,
            index: None,
        },
    );
    (result, terminal.take_output())
}

#[test]
fn test_help_path_for_every_command_and_alias() {
    for provider in default_providers().unwrap() {
        let aliases = provider.command_aliases();
        let names = provider.command_names();
        for name in names.iter().chain(aliases.keys()) {
            let (result, output) = help_result(&provider, name);
            let CommandResult::HelpRequested(text) = result else {
                panic!("{name} --help did not request help");
            };
            assert!(output.is_empty(), "{name} --help wrote to the terminal");
            let desc = HelpDescriptor::parse(&text);
            assert!(!desc.usage.is_empty());
            let help = desc.find_option("-?").unwrap();
            assert_eq!(help.flag, "--help");
        }
    }
}

#[test]
fn test_has_command_matches_names_and_aliases() {
    for provider in default_providers().unwrap() {
        let names = provider.command_names();
        let aliases = provider.command_aliases();
        for name in names.iter().chain(aliases.keys()) {
            assert!(provider.has_command(name));
        }
        for other in ["", "tputs", "HELP", "warp"] {
            assert!(!provider.has_command(other));
        }
    }
}

#[test]
fn test_compiled_completers_cover_every_name_and_alias() {
    let registry = default_registry().unwrap();
    let completer = registry.compile_completers();
    for provider in registry.index().providers() {
        for (alias, target) in provider.command_aliases() {
            assert!(provider.command_names().contains(&target));
            assert!(completer.contains(&alias), "no completer for alias {alias}");
        }
        for name in provider.command_names() {
            assert!(completer.contains(&name), "no completer for {name}");
        }
    }
}

#[test]
fn test_provider_precedence() {
    let registry = default_registry().unwrap();
    let names: Vec<&str> = registry
        .index()
        .providers()
        .iter()
        .map(|p| p.provider_name())
        .collect();
    assert_eq!(names, vec![BUILTINS, TERMINAL]);
    assert_eq!(
        registry.index().owner("cls").map(|p| p.provider_name()),
        Some(TERMINAL)
    );
    assert!(registry.index().owner("x").is_none());
}

#[test]
fn test_describe_feeds_the_tailtip() {
    let registry = default_registry().unwrap();
    let desc = registry.describe("list-variables").unwrap();
    assert_eq!(desc.name, "vars");
    assert_eq!(desc.arguments, vec!["[FILTER]"]);
    assert!(desc.find_option("-o").is_some());
}

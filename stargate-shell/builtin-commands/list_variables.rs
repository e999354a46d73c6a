// Copyright (c) 2025 Dmitry Kalashnikov
// Dual Licensed: Open-Source (see LICENSE) / Commercial (proprietary use)
// Commercial use requires a Commercial License. See LICENSE file.

// vars (list-variables) built-in command
use clap::{Arg, ArgAction, Command};
use serde_json::{Value, json};
use std::fmt::Write;

use crate::commands::{CommandContext, CommandResult};
use crate::help::{parse_args, usage_command};

pub const NAME: &str = "vars";

mod options {
    pub const FILTER: &str = "FILTER";
    pub const OBJECT_OUTPUT: &str = "obj";
}

pub fn sg_app() -> Command {
    usage_command(NAME, "list evaluator variables", "vars [FILTER]")
        .arg(Arg::new(options::FILTER))
        .arg(
            Arg::new(options::OBJECT_OUTPUT)
                .short('o')
                .long("obj")
                .action(ArgAction::SetTrue)
                .help("Print the variables as a JSON object"),
        )
}

pub fn execute(args: &[String], ctx: &mut CommandContext<'_>) -> CommandResult {
    let matches = match parse_args(sg_app(), args).into_matches(NAME) {
        Ok(m) => m,
        Err(result) => return result,
    };
    let filter = matches
        .get_one::<String>(options::FILTER)
        .map_or("", String::as_str);

    let mut var_list: Vec<(String, &'static str, String)> = ctx
        .evaluator
        .variables()
        .into_iter()
        .filter(|(name, _)| name.contains(filter))
        .map(|(name, value)| (name, type_name(&value), value.to_string()))
        .collect();
    var_list.sort_by(|a, b| a.0.cmp(&b.0));

    if matches.get_flag(options::OBJECT_OUTPUT) {
        let entries: Vec<Value> = var_list
            .iter()
            .map(|(name, type_name, value)| {
                json!({
                    "name": name,
                    "value": value,
                    "type": type_name,
                })
            })
            .collect();
        return CommandResult::Value(Some(json!({
            "variables": entries,
            "count": entries.len(),
        })));
    }

    super::io_result(NAME, ctx.terminal.write_str(&table(&var_list, filter)))
}

fn table(var_list: &[(String, &'static str, String)], filter: &str) -> String {
    if var_list.is_empty() {
        return if filter.is_empty() {
            "No variables defined.\n".to_string()
        } else {
            format!("No variables matching '{filter}'.\n")
        };
    }
    let max_name_len = var_list.iter().map(|(n, _, _)| n.len()).max().unwrap_or(4).max(4);
    let max_type_len = var_list.iter().map(|(_, t, _)| t.len()).max().unwrap_or(4).max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:<max_name_len$}  {:<max_type_len$}  Value", "Name", "Type");
    let _ = writeln!(out, "{}", "-".repeat(max_name_len + max_type_len + 20));
    for (name, type_name, value) in var_list {
        let _ = writeln!(out, "{name:<max_name_len$}  {type_name:<max_type_len$}  {value}");
    }
    out
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{Evaluator, JsonEvaluator};
    use crate::terminal::MemoryTerminal;
    use pretty_assertions::assert_eq;

    fn run(evaluator: &JsonEvaluator, args: &[&str]) -> (CommandResult, String) {
        let mut terminal = MemoryTerminal::new();
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let result = execute(
            &args,
            &mut CommandContext {
                terminal: &mut terminal,
                evaluator,
                index: None,
            },
        );
        (result, terminal.take_output())
    }

    fn evaluator() -> JsonEvaluator {
        let mut evaluator = JsonEvaluator::new();
        evaluator.bind("answer", json!(42));
        evaluator.bind("name", json!("stargate"));
        evaluator
    }

    #[test]
    fn test_table() {
        let (_, output) = run(&evaluator(), &[]);
        assert_eq!(
            output,
            "Name    Type    Value\n\
             --------------------------------\n\
             answer  number  42\n\
             name    string  \"stargate\"\n"
        );
    }

    #[test]
    fn test_filter_without_match() {
        let (_, output) = run(&evaluator(), &["zzz"]);
        assert_eq!(output, "No variables matching 'zzz'.\n");
    }

    #[test]
    fn test_object_output() {
        let (result, output) = run(&evaluator(), &["-o", "ans"]);
        let CommandResult::Value(Some(value)) = result else {
            panic!("expected a value");
        };
        assert_eq!(value["count"], 1);
        assert_eq!(value["variables"][0]["name"], "answer");
        assert!(output.is_empty());
    }
}

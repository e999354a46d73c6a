// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Fallback evaluator for lines no command provider claims.

use glob::Pattern;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ShellError, ShellResult};

pub trait Evaluator {
    /// Evaluate free-form input. `Ok(None)` means "nothing to print".
    fn execute(&mut self, text: &str) -> ShellResult<Option<Value>>;

    /// Drop every binding whose name matches the glob `pattern`.
    fn clear(&mut self, pattern: &str);

    fn bind(&mut self, name: &str, value: Value);

    fn get(&self, name: &str) -> Option<&Value>;

    fn variables(&self) -> Vec<(String, Value)>;
}

/// A deliberately small evaluator: JSON literals, variable lookup and
/// `name = <json>` assignment.
#[derive(Debug, Default)]
pub struct JsonEvaluator {
    variables: BTreeMap<String, Value>,
}

impl JsonEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    fn evaluate_expression(&self, text: &str) -> ShellResult<Value> {
        if is_identifier(text) && !matches!(text, "true" | "false" | "null") {
            return self
                .variables
                .get(text)
                .cloned()
                .ok_or_else(|| ShellError::UnknownVariable(text.to_string()));
        }
        serde_json::from_str(text).map_err(|e| ShellError::Eval {
            input: text.to_string(),
            message: e.to_string(),
        })
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `name = expr`, leaving `==` and JSON containing `=` alone.
fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let (name, expr) = text.split_once('=')?;
    let name = name.trim();
    if expr.starts_with('=') || !is_identifier(name) {
        return None;
    }
    Some((name, expr.trim()))
}

impl Evaluator for JsonEvaluator {
    fn execute(&mut self, text: &str) -> ShellResult<Option<Value>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if let Some((name, expr)) = split_assignment(text) {
            let value = self.evaluate_expression(expr)?;
            debug!("bind {name}");
            self.variables.insert(name.to_string(), value.clone());
            return Ok(Some(value));
        }
        self.evaluate_expression(text).map(Some)
    }

    fn clear(&mut self, pattern: &str) {
        match Pattern::new(pattern) {
            Ok(pattern) => self.variables.retain(|name, _| !pattern.matches(name)),
            Err(_) => {
                self.variables.remove(pattern);
            }
        }
    }

    fn bind(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    fn variables(&self) -> Vec<(String, Value)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

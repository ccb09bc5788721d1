// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value annotations attached to start and stop events.

use serde_json::{Map, Value};

/// Separator placed between the start-time and stop-time annotations in a
/// run record's `params` column.
pub const PARAMS_SEPARATOR: &str = "|";

/// Query parameters supplied with a start or stop request, in arrival order.
///
/// Repeated keys are kept; each pair becomes its own parameter row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encode as a JSON object mapping each key to the list of its values,
    /// e.g. `{"host":["a"],"tag":["x","y"]}`. Keys are sorted; values keep
    /// arrival order. No parameters encode as `{}`.
    pub fn to_json(&self) -> String {
        let mut grouped: Map<String, Value> = Map::new();
        for (key, value) in &self.pairs {
            let entry = grouped.entry(key.clone()).or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(values) = entry {
                values.push(Value::String(value.clone()));
            }
        }
        Value::Object(grouped).to_string()
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { pairs: iter.into_iter().collect() }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;

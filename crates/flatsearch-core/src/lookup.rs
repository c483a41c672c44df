//! Nested field lookup and the canonical text form of record values.
//!
//! Every condition match goes through [`stringify`] so that numbers, booleans
//! and nested values always produce the same text regardless of where they
//! came from.

use serde_json::{Number, Value};

/// A dot-separated path into a record, e.g. `house.year`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments in traversal order. An empty segment (`a..b`) is kept
    /// and simply never resolves.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resolve `path` against `record`.
///
/// Returns `None` when a segment is missing, when traversal reaches a
/// non-object before the path is exhausted, or when the value found is
/// `null`.
pub fn lookup<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .try_fold(record, |current, key| match current {
            Value::Object(map) => map.get(key),
            _ => None,
        })
        .filter(|value| !value.is_null())
}

/// Canonical text form of a value.
///
/// Strings are returned as-is, booleans as `true`/`false`, numbers in plain
/// decimal with integral floats printed without a fraction. Arrays join their
/// elements with `,`; objects render as `[object Object]`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => float_text(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip decimal, switching to exponent notation below `1e-6`
/// and from `1e21` upwards (`1.5e-7`, `1e+21`).
fn float_text(f: f64) -> String {
    let abs = f.abs();
    if f == 0.0 {
        return "0".to_string();
    }
    if abs < 1e-6 || abs >= 1e21 {
        let text = format!("{f:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    f.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

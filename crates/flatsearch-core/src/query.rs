//! Structured query parser.
//!
//! A query is a `/`-separated list of `field:value` conditions:
//!
//! ```text
//! isNew:true / house.year:2010 / name:sunset
//! ```
//!
//! Each segment is trimmed and split on its **first** `:`. Segments that are
//! empty, have no `:`, or have an empty field or value are dropped. There is
//! no escaping: a value can contain further `:` characters but never a `/`.

use crate::lookup::{lookup, stringify, FieldPath};
use serde_json::Value;

/// Separator between conditions.
pub const CONDITION_SEPARATOR: char = '/';
/// Separator between a condition's field path and its value.
pub const FIELD_SEPARATOR: char = ':';

/// One `field:value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    field: FieldPath,
    value: String,
    /// Lowercased `value`, computed once at parse time.
    needle: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            field: FieldPath::new(field),
            needle: value.to_lowercase(),
            value,
        }
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Case-insensitive substring match of the value against the record's
    /// field. A record without the field never matches.
    pub fn matches(&self, record: &Value) -> bool {
        match lookup(record, &self.field) {
            Some(found) => stringify(found).to_lowercase().contains(&self.needle),
            None => false,
        }
    }

    /// Parse a single trimmed segment, or `None` if it is not a usable
    /// condition.
    fn from_segment(segment: &str) -> Option<Self> {
        let (field, value) = segment.split_once(FIELD_SEPARATOR)?;
        if field.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self::new(field, value))
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.field, FIELD_SEPARATOR, self.value)
    }
}

/// A parsed query: the conjunction of its conditions, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    conditions: Vec<Condition>,
}

impl Query {
    /// Parse a raw query string. Never fails; unusable segments are dropped.
    pub fn parse(input: &str) -> Self {
        let conditions: Vec<Condition> = input
            .split(CONDITION_SEPARATOR)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let parsed = Condition::from_segment(segment);
                if parsed.is_none() {
                    tracing::trace!(segment, "query: dropped segment");
                }
                parsed
            })
            .collect();

        tracing::trace!(input, conditions = conditions.len(), "query: parsed");
        Self { conditions }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// `true` when no condition survived parsing; such a query matches
    /// everything.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl std::str::FromStr for Query {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, "{CONDITION_SEPARATOR}")?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

/// Append a field token to a query the way the search palette does: with a
/// `/` separator unless the query is empty.
pub fn append_token(query: &str, token: &str) -> String {
    if query.is_empty() {
        token.to_string()
    } else {
        format!("{query}{CONDITION_SEPARATOR}{token}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Decoding of `/flats/flat-list` payloads.
//!
//! Two shapes are accepted: a bare JSON array of records, or the backend's
//! envelope `{"flats": [...]}`. An envelope without `flats` decodes to an
//! empty collection.

use crate::FeedError;
use flatsearch_core::Listing;
use serde_json::Value;

/// Envelope key that holds the record array.
pub const ENVELOPE_KEY: &str = "flats";

pub fn decode(bytes: &[u8]) -> Result<Vec<Listing>, FeedError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => return Err(FeedError::Shape(kind(&other))),
        },
        other => return Err(FeedError::Shape(kind(&other))),
    };
    Ok(items.into_iter().map(Listing::new).collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

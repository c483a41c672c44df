//! Core types for flatsearch-core.
//!
//! Records travel through the system as plain [`serde_json::Value`] documents
//! so the filter can address any nested field by path. [`Listing`] pairs a
//! document with a typed [`Flat`] view when the document has the flat shape;
//! the typed view is only used for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything the structured query filter can run against.
///
/// The filter only ever reads the document, it never mutates it.
pub trait Document {
    fn document(&self) -> &Value;
}

impl Document for Value {
    fn document(&self) -> &Value {
        self
    }
}

impl<T: Document + ?Sized> Document for &T {
    fn document(&self) -> &Value {
        (**self).document()
    }
}

/// One record from the listings backend.
///
/// The original document is kept verbatim so filtering sees exactly the
/// fields the backend sent, including ones [`Flat`] does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    document: Value,
    flat: Option<Flat>,
}

impl Listing {
    pub fn new(document: Value) -> Self {
        let flat = Flat::deserialize(&document).ok();
        Self { document, flat }
    }

    /// Typed view of the record, or `None` if the document does not have the
    /// flat shape.
    pub fn flat(&self) -> Option<&Flat> {
        self.flat.as_ref()
    }

    pub fn into_document(self) -> Value {
        self.document
    }
}

impl Document for Listing {
    fn document(&self) -> &Value {
        &self.document
    }
}

impl From<Value> for Listing {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

impl From<Flat> for Listing {
    fn from(flat: Flat) -> Self {
        // Flat only holds JSON-representable fields, so this cannot fail.
        let document = serde_json::to_value(&flat).unwrap_or(Value::Null);
        Self {
            document,
            flat: Some(flat),
        }
    }
}

/// A flat listing as served by `GET /flats/flat-list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flat {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    /// Kept as the backend's own string; never reformatted for matching.
    pub creation_date: String,
    pub area: f64,
    pub price: f64,
    pub balcony: bool,
    pub time_to_metro_on_foot: f64,
    pub number_of_rooms: i64,
    pub is_new: bool,
    pub furnish: Furnish,
    pub view: String,
    pub house: House,
    pub owner_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub name: String,
    pub year: i64,
    pub number_of_flats_on_floor: i64,
}

/// Finish level of a flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Furnish {
    Designer,
    None,
    Fine,
    Bad,
    Little,
}

impl std::fmt::Display for Furnish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Furnish::Designer => write!(f, "DESIGNER"),
            Furnish::None => write!(f, "NONE"),
            Furnish::Fine => write!(f, "FINE"),
            Furnish::Bad => write!(f, "BAD"),
            Furnish::Little => write!(f, "LITTLE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

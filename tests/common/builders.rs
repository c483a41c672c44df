//! Test builders: ergonomic constructors for flat records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use flatsearch_core::Listing;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// FlatBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for flat-shaped JSON records.
///
/// Starts from a complete, valid flat so every built record also parses as a
/// typed [`flatsearch_core::Flat`]; override only what the test cares about.
///
/// ```rust,ignore
/// let flat = FlatBuilder::new(7)
///     .name("Sunset Flat")
///     .rooms(2)
///     .house("Tower", 2010)
///     .build();
/// ```
pub struct FlatBuilder {
    doc: Value,
}

impl FlatBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            doc: json!({
                "id": id,
                "name": format!("flat {id}"),
                "coordinates": { "x": 0, "y": 0 },
                "creationDate": "2024-01-15T10:00:00",
                "area": 40,
                "price": 100000,
                "balcony": false,
                "timeToMetroOnFoot": 10,
                "numberOfRooms": 1,
                "isNew": false,
                "furnish": "NONE",
                "view": "STREET",
                "house": { "name": "Block A", "year": 2000, "numberOfFlatsOnFloor": 4 },
                "ownerId": 1
            }),
        }
    }

    pub fn name(self, name: &str) -> Self {
        self.set("name", json!(name))
    }

    pub fn rooms(self, n: i64) -> Self {
        self.set("numberOfRooms", json!(n))
    }

    pub fn price(self, price: f64) -> Self {
        self.set("price", json!(price))
    }

    pub fn area(self, area: f64) -> Self {
        self.set("area", json!(area))
    }

    pub fn is_new(self, is_new: bool) -> Self {
        self.set("isNew", json!(is_new))
    }

    pub fn balcony(self, balcony: bool) -> Self {
        self.set("balcony", json!(balcony))
    }

    pub fn furnish(self, furnish: &str) -> Self {
        self.set("furnish", json!(furnish))
    }

    pub fn view(self, view: &str) -> Self {
        self.set("view", json!(view))
    }

    pub fn house(mut self, name: &str, year: i64) -> Self {
        self.doc["house"]["name"] = json!(name);
        self.doc["house"]["year"] = json!(year);
        self
    }

    /// Drop the `house` object entirely.
    pub fn without_house(mut self) -> Self {
        if let Value::Object(map) = &mut self.doc {
            map.remove("house");
        }
        self
    }

    /// Set any top-level field, including ones a flat does not have.
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.doc[key] = value;
        self
    }

    pub fn build(self) -> Value {
        self.doc
    }

    pub fn listing(self) -> Listing {
        Listing::new(self.doc)
    }
}

/// Ids of `records`, in order. Records without a numeric id map to `-1`.
pub fn ids<'a, I>(records: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'a Value>,
{
    records
        .into_iter()
        .map(|r| r["id"].as_i64().unwrap_or(-1))
        .collect()
}

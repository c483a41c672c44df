//! Static listing corpora used across harnesses.

use super::builders::FlatBuilder;
use serde_json::{json, Value};

/// Five flats covering the fields the examples in the docs search on.
///
/// | id | name            | rooms | isNew | house.year | notes              |
/// |----|-----------------|-------|-------|------------|--------------------|
/// | 1  | Sunset Flat     | 2     | true  | 2010       |                    |
/// | 2  | Harbour View    | 3     | false | 1985       | price 2 500 000    |
/// | 3  | Sunrise Loft    | 2     | false | 2015       | view "PARK: EAST"  |
/// | 4  | Garden Studio   | 1     | true  | 2010       | no house object    |
/// | 5  | sunset terrace  | 4     | true  | 2021       | balcony            |
pub fn sample_flats() -> Vec<Value> {
    vec![
        FlatBuilder::new(1)
            .name("Sunset Flat")
            .rooms(2)
            .is_new(true)
            .house("Tower", 2010)
            .build(),
        FlatBuilder::new(2)
            .name("Harbour View")
            .rooms(3)
            .price(2_500_000.0)
            .house("Old Mill", 1985)
            .build(),
        FlatBuilder::new(3)
            .name("Sunrise Loft")
            .rooms(2)
            .view("PARK: EAST")
            .house("Riverside", 2015)
            .build(),
        FlatBuilder::new(4)
            .name("Garden Studio")
            .rooms(1)
            .is_new(true)
            .without_house()
            .build(),
        FlatBuilder::new(5)
            .name("sunset terrace")
            .rooms(4)
            .is_new(true)
            .balcony(true)
            .house("Skyline", 2021)
            .build(),
    ]
}

/// The backend's envelope around [`sample_flats`].
pub fn sample_envelope() -> Value {
    json!({ "flats": sample_flats() })
}

/// Serialized [`sample_envelope`], as the backend sends it.
pub fn sample_envelope_json() -> String {
    sample_envelope().to_string()
}

/// `n` generated flats for throughput tests. Deterministic.
pub fn generated_flats(n: usize) -> Vec<Value> {
    const NAMES: &[&str] = &["Sunset", "Harbour", "Garden", "Skyline", "Riverside", "Old Mill"];
    const FURNISH: &[&str] = &["DESIGNER", "NONE", "FINE", "BAD", "LITTLE"];
    (0..n)
        .map(|i| {
            FlatBuilder::new(i as i64 + 1)
                .name(&format!("{} {}", NAMES[i % NAMES.len()], i))
                .rooms((i % 5) as i64 + 1)
                .is_new(i % 3 == 0)
                .price(50_000.0 + (i * 1_750) as f64)
                .furnish(FURNISH[i % FURNISH.len()])
                .house(NAMES[(i / 7) % NAMES.len()], 1950 + (i % 75) as i64)
                .build()
        })
        .collect()
}

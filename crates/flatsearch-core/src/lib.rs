//! flatsearch-core: records and the structured query filter.
//!
//! A query such as `isNew:true/house.year:2010` is parsed into a list of
//! `field:value` conditions and evaluated against JSON records by
//! case-insensitive substring match on dotted field paths.
//!
//! # Pipeline
//!
//! ```text
//! &str ──► Query::parse ──► [Condition] ──► Query::filter(&[R]) ──► Vec<&R>
//!                                 │
//!                                 └─ lookup(path) ─► stringify ─► contains
//! ```
//!
//! Everything here is synchronous and pure; record sources live in
//! `flatsearch-feeds`.

pub mod config;
pub mod filter;
pub mod lookup;
pub mod query;
pub mod types;

pub use filter::filter;
pub use lookup::{lookup, stringify, FieldPath};
pub use query::{append_token, Condition, Query};
pub use types::{Coordinates, Document, Flat, Furnish, House, Listing};

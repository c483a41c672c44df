//! Filter a record collection with a structured [`Query`].
//!
//! Filtering is a pure function of the collection and the query. Nothing is
//! cached: callers re-run it on every query or collection change.

use crate::query::Query;
use crate::types::Document;

impl Query {
    /// `true` when every condition matches `record`. A query without
    /// conditions matches everything.
    pub fn matches<R: Document + ?Sized>(&self, record: &R) -> bool {
        let document = record.document();
        self.conditions().iter().all(|c| c.matches(document))
    }

    /// The records that match, in their original relative order.
    pub fn filter<'a, R: Document>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Number of matching records, without collecting them.
    pub fn count<R: Document>(&self, records: &[R]) -> usize {
        records.iter().filter(|r| self.matches(*r)).count()
    }
}

/// Parse `query` and return the matching subsequence of `records`.
pub fn filter<'a, R: Document>(records: &'a [R], query: &str) -> Vec<&'a R> {
    Query::parse(query).filter(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

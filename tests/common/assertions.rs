//! Domain-specific assertion macros for flatsearch harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages naming the query
//! and the ids involved.

/// Assert that filtering `$records` with `$query` yields exactly the records
/// with ids `$ids`, in that order.
///
/// ```rust,ignore
/// assert_matches_ids!(sample_flats(), "isNew:true/numberOfRooms:2", [1]);
/// ```
#[macro_export]
macro_rules! assert_matches_ids {
    ($records:expr, $query:expr, [$($id:expr),* $(,)?]) => {{
        let records: &[serde_json::Value] = &$records;
        let query: &str = $query;
        let got: Vec<i64> = $crate::common::ids(flatsearch_core::filter(records, query));
        let expected: Vec<i64> = vec![$($id),*];
        pretty_assertions::assert_eq!(got, expected, "query {:?}", query);
    }};
}

/// Assert that two queries select the same records from `$records`.
#[macro_export]
macro_rules! assert_same_selection {
    ($records:expr, $left:expr, $right:expr) => {{
        let records: &[serde_json::Value] = &$records;
        let left = $crate::common::ids(flatsearch_core::filter(records, $left));
        let right = $crate::common::ids(flatsearch_core::filter(records, $right));
        pretty_assertions::assert_eq!(left, right, "queries {:?} and {:?} differ", $left, $right);
    }};
}

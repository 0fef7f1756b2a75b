//! # Edge Store Trait
//!
//! This is THE contract between the graph query builder and whatever holds
//! the raw relationship facts (a columnar warehouse, a SQL view, memory).
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryEdgeStore` | `memory` | In-memory for testing/embedding |

pub mod memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::NaiveDate;
use smallvec::SmallVec;

use crate::model::*;
use crate::Result;

pub use memory::MemoryEdgeStore;

// ============================================================================
// Edge query
// ============================================================================

/// Active relation kinds of a query. Never more than the four known kinds.
pub type RelationSet = SmallVec<[RelationType; 4]>;

/// Candidate selection for one graph request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeQuery {
    /// The id must appear as source, target or actor.
    pub touches_id: String,
    pub relation_types: RelationSet,
    /// Inclusive lower bound on the timestamp's calendar date.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound on the timestamp's calendar date.
    pub end: Option<NaiveDate>,
}

impl EdgeQuery {
    /// Reference predicate for stores that filter in process.
    pub fn matches(&self, edge: &RawEdge) -> bool {
        edge.touches(&self.touches_id)
            && self.relation_types.contains(&edge.relation_type)
            && self.in_time_range(edge.timestamp.as_deref())
    }

    fn in_time_range(&self, timestamp: Option<&str>) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let Some(date) = timestamp.and_then(timestamp_date) else {
            return false;
        };
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Leading calendar date of an ISO-ish timestamp (`2024-03-01`, `2024-03-01T10:00:00Z`, ...).
pub fn timestamp_date(ts: &str) -> Option<NaiveDate> {
    let head = ts.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// The canonical candidate order: timestamp descending with missing
/// timestamps last, then `(source_id, target_id)` ascending. Relation type
/// and actor break any remaining tie so the order is total.
pub fn candidate_order(a: &RawEdge, b: &RawEdge) -> Ordering {
    let by_time = match (&a.timestamp, &b.timestamp) {
        (Some(ta), Some(tb)) => tb.cmp(ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time
        .then_with(|| a.source_id.cmp(&b.source_id))
        .then_with(|| a.target_id.cmp(&b.target_id))
        .then_with(|| a.relation_type.cmp(&b.relation_type))
        .then_with(|| a.actor_id.cmp(&b.actor_id))
}

// ============================================================================
// Window
// ============================================================================

/// `[offset, offset + limit)` over the ordered candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: usize,
    pub offset: usize,
}

/// One window of candidates and the size of the whole candidate set,
/// taken from the same read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeWindow {
    pub edges: Vec<RawEdge>,
    pub total: u64,
}

// ============================================================================
// EdgeStore Trait
// ============================================================================

/// The read contract the graph query builder depends on.
///
/// Any failure to reach the underlying store must be reported as
/// `Error::DependencyUnavailable`; the builder passes it through untouched.
#[async_trait]
pub trait EdgeStore: Send + Sync + 'static {
    /// Select, order (see [`candidate_order`]), count and window the
    /// candidate edges in one logically consistent read.
    async fn edge_window(&self, query: &EdgeQuery, window: Window) -> Result<EdgeWindow>;

    /// Batch-resolve document records. Unknown ids are simply absent from
    /// the output; output order is unspecified.
    async fn documents(&self, ids: &[String]) -> Result<Vec<DocumentNode>>;

    /// Batch-resolve person records. Same contract as [`documents`](Self::documents).
    async fn persons(&self, ids: &[String]) -> Result<Vec<PersonNode>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn query(start: Option<&str>, end: Option<&str>) -> EdgeQuery {
        EdgeQuery {
            touches_id: "D1".into(),
            relation_types: smallvec![RelationType::Reference, RelationType::Vote],
            start: start.and_then(timestamp_date),
            end: end.and_then(timestamp_date),
        }
    }

    #[test]
    fn test_matches_any_endpoint_slot() {
        let q = query(None, None);
        assert!(q.matches(&RawEdge::reference("D1", "D2")));
        assert!(q.matches(&RawEdge::reference("D0", "D1")));
        assert!(q.matches(&RawEdge::vote("P1", "D1")));
        assert!(!q.matches(&RawEdge::speech("P1", "D1")), "speech is not in the active set");
        assert!(!q.matches(&RawEdge::reference("D2", "D3")));
    }

    #[test]
    fn test_time_range_is_inclusive_by_day() {
        let q = query(Some("2024-01-01"), Some("2024-01-31"));
        let at = |ts: &str| RawEdge::reference("D1", "D2").with_timestamp(ts);
        assert!(q.matches(&at("2024-01-01")));
        assert!(q.matches(&at("2024-01-31T23:59:00")));
        assert!(!q.matches(&at("2023-12-31T23:59:00")));
        assert!(!q.matches(&at("2024-02-01")));
        assert!(!q.matches(&RawEdge::reference("D1", "D2")), "no timestamp fails an active filter");
    }

    #[test]
    fn test_candidate_order() {
        let newer = RawEdge::reference("B", "X").with_timestamp("2024-05-01");
        let older = RawEdge::reference("A", "X").with_timestamp("2024-04-01");
        let undated = RawEdge::reference("A", "A");
        let tie = RawEdge::reference("A", "Y").with_timestamp("2024-05-01");

        let mut edges = vec![undated.clone(), older.clone(), newer.clone(), tie.clone()];
        edges.sort_by(candidate_order);
        assert_eq!(edges, vec![tie, newer, older, undated]);
    }
}

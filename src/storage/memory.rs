//! In-memory edge store.
//!
//! This is the reference implementation of `EdgeStore`.
//! It keeps edges in a Vec and node records in HashMaps, all behind RwLocks.
//!
//! ## Limitations
//!
//! - **No indexes**: every `edge_window()` call scans all edges.
//! - **Snapshot per read**: selection, counting and windowing run under one
//!   read lock, so `total` and the window always agree. Node resolution is a
//!   separate read and may observe later writes.
//!
//! Use this store for:
//! - Testing the query builder, layout and lifecycle inference
//! - Embedding the graph in applications that load edges up front

use std::sync::Arc;

use async_trait::async_trait;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::*;
use crate::Result;
use super::{EdgeQuery, EdgeStore, EdgeWindow, Window, candidate_order};

// ============================================================================
// MemoryEdgeStore
// ============================================================================

/// In-memory relationship store. Cheap to clone; clones share data.
#[derive(Clone, Default)]
pub struct MemoryEdgeStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    edges: RwLock<Vec<RawEdge>>,
    documents: RwLock<HashMap<String, DocumentNode>>,
    persons: RwLock<HashMap<String, PersonNode>>,
}

impl MemoryEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge(&self, edge: RawEdge) {
        self.inner.edges.write().push(edge);
    }

    pub fn insert_edges(&self, edges: impl IntoIterator<Item = RawEdge>) {
        self.inner.edges.write().extend(edges);
    }

    /// Insert or replace a document record.
    pub fn upsert_document(&self, doc: DocumentNode) {
        self.inner.documents.write().insert(doc.id.clone(), doc);
    }

    /// Insert or replace a person record.
    pub fn upsert_person(&self, person: PersonNode) {
        self.inner.persons.write().insert(person.id.clone(), person);
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edges.read().len()
    }

    /// Recompute every stored document's reference degree from the stored
    /// `reference` edges.
    pub fn refresh_reference_counts(&self) {
        let mut outgoing: HashMap<String, u64> = HashMap::new();
        let mut incoming: HashMap<String, u64> = HashMap::new();
        {
            let edges = self.inner.edges.read();
            for edge in edges.iter().filter(|e| e.relation_type == RelationType::Reference) {
                if let Some(src) = &edge.source_id {
                    *outgoing.entry(src.clone()).or_default() += 1;
                }
                if let Some(dst) = &edge.target_id {
                    *incoming.entry(dst.clone()).or_default() += 1;
                }
            }
        }

        let mut docs = self.inner.documents.write();
        for (id, doc) in docs.iter_mut() {
            doc.outgoing_count = Some(outgoing.get(id).copied().unwrap_or(0));
            doc.incoming_count = Some(incoming.get(id).copied().unwrap_or(0));
        }
    }
}

// ============================================================================
// EdgeStore impl
// ============================================================================

#[async_trait]
impl EdgeStore for MemoryEdgeStore {
    async fn edge_window(&self, query: &EdgeQuery, window: Window) -> Result<EdgeWindow> {
        let edges = self.inner.edges.read();

        let mut candidates: Vec<&RawEdge> = edges.iter().filter(|e| query.matches(e)).collect();
        candidates.sort_by(|a, b| candidate_order(a, b));

        let total = candidates.len() as u64;
        let edges = candidates
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .cloned()
            .collect();

        Ok(EdgeWindow { edges, total })
    }

    async fn documents(&self, ids: &[String]) -> Result<Vec<DocumentNode>> {
        let docs = self.inner.documents.read();
        Ok(ids.iter().filter_map(|id| docs.get(id).cloned()).collect())
    }

    async fn persons(&self, ids: &[String]) -> Result<Vec<PersonNode>> {
        let persons = self.inner.persons.read();
        Ok(ids.iter().filter_map(|id| persons.get(id).cloned()).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RelationSet;

    fn all_relations() -> RelationSet {
        RelationType::ALLOWED.iter().cloned().collect()
    }

    fn query(id: &str) -> EdgeQuery {
        EdgeQuery {
            touches_id: id.into(),
            relation_types: all_relations(),
            start: None,
            end: None,
        }
    }

    #[tokio::test]
    async fn test_window_and_total_agree() {
        let store = MemoryEdgeStore::new();
        for day in 1..=9 {
            store.insert_edge(
                RawEdge::reference("D1", format!("D{}", day + 10))
                    .with_timestamp(format!("2024-01-0{day}")),
            );
        }
        store.insert_edge(RawEdge::reference("X", "Y").with_timestamp("2024-01-05"));

        let page = store
            .edge_window(&query("D1"), Window { limit: 4, offset: 2 })
            .await
            .unwrap();

        assert_eq!(page.total, 9);
        assert_eq!(page.edges.len(), 4);
        assert_eq!(page.edges[0].timestamp.as_deref(), Some("2024-01-07"));
        assert_eq!(page.edges[3].timestamp.as_deref(), Some("2024-01-04"));
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let store = MemoryEdgeStore::new();
        store.insert_edge(RawEdge::vote("P1", "D1"));

        let page = store
            .edge_window(&query("D1"), Window { limit: 10, offset: 5 })
            .await
            .unwrap();
        assert!(page.edges.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_resolution_skips_unknown_ids() {
        let store = MemoryEdgeStore::new();
        store.upsert_document(DocumentNode::new("D1").with_title("Budget"));
        store.upsert_person(PersonNode::new("P1"));

        let docs = store.documents(&["D1".into(), "D404".into()]).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title.as_deref(), Some("Budget"));

        let persons = store.persons(&["P404".into()]).await.unwrap();
        assert!(persons.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reference_counts() {
        let store = MemoryEdgeStore::new();
        store.upsert_document(DocumentNode::new("D1"));
        store.upsert_document(DocumentNode::new("D2"));
        store.upsert_document(DocumentNode::new("D3"));
        store.insert_edges([
            RawEdge::reference("D1", "D2"),
            RawEdge::reference("D1", "D3"),
            RawEdge::reference("D3", "D2"),
            RawEdge::vote("P1", "D2"),
        ]);

        store.refresh_reference_counts();

        let docs = store.documents(&["D1".into(), "D2".into()]).await.unwrap();
        assert_eq!((docs[0].outgoing_count, docs[0].incoming_count), (Some(2), Some(0)));
        assert_eq!((docs[1].outgoing_count, docs[1].incoming_count), (Some(0), Some(2)));
    }
}

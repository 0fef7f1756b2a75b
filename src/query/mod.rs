//! Graph query builder — turns a focus entity and filters into one
//! windowed, deduplicated page of the relationship graph.
//!
//! ```text
//! GraphRequest ─normalize─▶ GraphQuery ─edge_window─▶ RawEdge[] + total
//!   ─normalize endpoints─▶ NormalizedEdge[] ─resolve ids─▶ Node[] ─▶ GraphResult
//! ```
//!
//! Exactly one edge read per call, plus one batch read each for documents
//! and persons. No retries: a store failure is returned as-is.

pub mod params;

use hashbrown::{HashMap, HashSet};

use crate::config::QueryLimits;
use crate::model::*;
use crate::storage::EdgeStore;
use crate::Result;

pub use params::{GraphQuery, GraphRequest};

/// Build a graph page for a raw request.
pub async fn build_graph<S: EdgeStore>(
    store: &S,
    request: &GraphRequest,
    limits: &QueryLimits,
) -> Result<GraphResult> {
    let query = request.normalize(limits)?;
    build_graph_for(store, &query).await
}

/// Build a graph page for an already-normalized query.
pub async fn build_graph_for<S: EdgeStore>(store: &S, query: &GraphQuery) -> Result<GraphResult> {
    tracing::debug!(
        focus = %query.focus_id,
        relations = ?query.relation_types,
        start = ?query.start,
        end = ?query.end,
        limit = query.limit,
        offset = query.offset,
        "building relationship graph"
    );

    let window = store
        .edge_window(&query.edge_query(), query.window())
        .await
        .inspect_err(|e| tracing::warn!(focus = %query.focus_id, error = %e, "edge store read failed"))?;

    let raw_count = window.edges.len();
    let edges: Vec<NormalizedEdge> = window.edges.iter().filter_map(RawEdge::normalize).collect();
    if edges.len() < raw_count {
        tracing::warn!(
            focus = %query.focus_id,
            dropped = raw_count - edges.len(),
            "dropped edges with a missing endpoint"
        );
    }

    let doc_ids = document_ids(&query.focus_id, &edges);
    let person_ids = person_ids(&query.focus_id, &window.edges);

    let documents = store
        .documents(&doc_ids)
        .await
        .inspect_err(|e| tracing::warn!(focus = %query.focus_id, error = %e, "document resolution failed"))?;
    let persons = store
        .persons(&person_ids)
        .await
        .inspect_err(|e| tracing::warn!(focus = %query.focus_id, error = %e, "person resolution failed"))?;

    let nodes = assemble_nodes(&doc_ids, documents, &person_ids, persons);

    tracing::debug!(
        focus = %query.focus_id,
        edges = edges.len(),
        total = window.total,
        nodes = nodes.len(),
        "relationship graph built"
    );

    Ok(GraphResult {
        edges,
        nodes,
        page: PageInfo {
            limit: query.limit,
            offset: query.offset,
            total: window.total,
        },
    })
}

/// Focus first, then every document-side endpoint in first-seen order.
fn document_ids(focus: &str, edges: &[NormalizedEdge]) -> Vec<String> {
    let candidates = std::iter::once(focus).chain(edges.iter().flat_map(NormalizedEdge::document_ends));
    distinct(candidates)
}

/// Focus first, then every actor in first-seen order. Taken from the raw
/// window so actors of edges dropped during normalization still resolve.
fn person_ids(focus: &str, edges: &[RawEdge]) -> Vec<String> {
    let actors = edges
        .iter()
        .filter_map(|e| e.actor_id.as_deref())
        .filter(|id| !id.trim().is_empty());
    distinct(std::iter::once(focus).chain(actors))
}

fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).map(str::to_string).collect()
}

/// Order resolved records by request order, documents first, and never
/// emit an id twice (an id resolved as a document is not repeated as a person).
fn assemble_nodes(
    doc_ids: &[String],
    documents: Vec<DocumentNode>,
    person_ids: &[String],
    persons: Vec<PersonNode>,
) -> Vec<Node> {
    let mut documents: HashMap<String, DocumentNode> =
        documents.into_iter().map(|d| (d.id.clone(), d)).collect();
    let mut persons: HashMap<String, PersonNode> =
        persons.into_iter().map(|p| (p.id.clone(), p)).collect();

    let mut nodes: Vec<Node> = Vec::with_capacity(documents.len() + persons.len());
    let mut emitted: HashSet<String> = HashSet::new();

    for id in doc_ids {
        if let Some(doc) = documents.remove(id) {
            emitted.insert(id.clone());
            nodes.push(Node::Document(doc));
        }
    }
    for id in person_ids {
        if emitted.contains(id) {
            continue;
        }
        if let Some(person) = persons.remove(id) {
            nodes.push(Node::Person(person));
        }
    }

    tracing::debug!(
        requested_documents = doc_ids.len(),
        requested_persons = person_ids.len(),
        resolved = nodes.len(),
        "resolved graph nodes"
    );
    nodes
}

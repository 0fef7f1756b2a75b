//! Lifecycle chain inference.
//!
//! Reconstructs a "previous → focus → next" sequence for a document from its
//! unordered graph neighbors, using the static stage ranking of
//! [`LifecycleStage`]. Best effort: a document with no stage-adjacent
//! neighbors yields a chain of itself only. Never fails.

use hashbrown::HashSet;
use serde::Serialize;

use crate::model::*;

/// One neighbor of the focus and the edge that connects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub neighbor: Node,
    pub edge: NormalizedEdge,
    pub direction: Direction,
}

impl Connection {
    /// Stage of a document neighbor. Persons have none.
    pub fn stage(&self) -> Option<LifecycleStage> {
        self.neighbor.as_document().map(DocumentNode::stage)
    }
}

/// One step of the inferred chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainEntry {
    pub node: DocumentNode,
    pub stage: LifecycleStage,
    /// `None` for the focus entry.
    pub relation: Option<String>,
    /// `None` for the focus entry.
    pub direction: Option<Direction>,
}

impl ChainEntry {
    pub fn is_focus(&self) -> bool {
        self.relation.is_none()
    }
}

/// A neighbor that did not make it into the chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherConnection {
    pub neighbor: Node,
    pub direction: Direction,
    pub relation: String,
}

impl OtherConnection {
    pub fn summary(&self) -> String {
        let lead = match self.direction {
            Direction::Outgoing => "leads to",
            Direction::Incoming => "comes from",
        };
        format!("{lead} • {}", self.relation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleChain {
    pub chain: Vec<ChainEntry>,
    pub other: Vec<OtherConnection>,
}

impl LifecycleChain {
    /// Run connection extraction and inference for a focus in a graph result.
    /// `None` when the focus did not resolve to a document.
    pub fn for_focus(result: &GraphResult, focus_id: &str) -> Option<Self> {
        let focus = result.document(focus_id)?;
        let connections = connections(result, focus_id);
        Some(infer_chain(focus, focus.stage(), &connections))
    }

    /// The entries after the focus.
    pub fn next(&self) -> &[ChainEntry] {
        let focus_at = self.chain.iter().position(ChainEntry::is_focus).unwrap_or(0);
        self.chain.get(focus_at + 1..).unwrap_or_default()
    }
}

/// Human-readable relation label, with the subtype appended when present.
pub fn describe_relation(edge: &NormalizedEdge) -> String {
    let base = match &edge.relation_type {
        RelationType::Reference => "Reference",
        RelationType::PersonInvolved => "Person involved",
        RelationType::Speech => "Speech",
        RelationType::Vote => "Vote",
        RelationType::Other(raw) => raw.as_str(),
    };
    match edge.relation_subtype.as_deref().filter(|s| !s.is_empty()) {
        Some(sub) => format!("{base} • {sub}"),
        None => base.to_string(),
    }
}

/// Neighbor connections of `focus_id`, in edge order. Edges whose other end
/// is not among the result's nodes are skipped; a self-loop yields both an
/// outgoing and an incoming connection.
pub fn connections(result: &GraphResult, focus_id: &str) -> Vec<Connection> {
    let mut out = Vec::new();
    for edge in &result.edges {
        let ends = [
            (edge.from_id == focus_id).then_some((&edge.to_id, Direction::Outgoing)),
            (edge.to_id == focus_id).then_some((&edge.from_id, Direction::Incoming)),
        ];
        for (other, direction) in ends.into_iter().flatten() {
            if let Some(neighbor) = result.node(other) {
                out.push(Connection {
                    neighbor: neighbor.clone(),
                    edge: edge.clone(),
                    direction,
                });
            }
        }
    }
    out
}

/// Order the focus's document neighbors into a lifecycle chain.
///
/// - previous: the closest lower-ranked neighbor (first in input order on ties)
/// - next: up to two higher-ranked neighbors, closest first (input order on ties)
/// - other: every remaining neighbor, once per neighbor id
pub fn infer_chain(
    focus: &DocumentNode,
    focus_stage: LifecycleStage,
    connections: &[Connection],
) -> LifecycleChain {
    let rank = focus_stage.rank();
    let staged: Vec<Staged<'_>> = connections
        .iter()
        .filter(|c| c.neighbor.id() != focus.id)
        .filter_map(|c| {
            let doc = c.neighbor.as_document()?;
            Some(Staged { conn: c, doc, stage: doc.stage() })
        })
        .collect();

    let mut previous: Option<Staged<'_>> = None;
    for s in staged.iter().filter(|s| s.stage.rank() < rank) {
        if previous.is_none_or(|best| s.stage.rank() > best.stage.rank()) {
            previous = Some(*s);
        }
    }

    let mut following: Vec<Staged<'_>> =
        staged.iter().copied().filter(|s| s.stage.rank() > rank).collect();
    following.sort_by_key(|s| s.stage.rank());

    let mut in_chain: HashSet<&str> = HashSet::new();
    in_chain.insert(focus.id.as_str());

    let mut chain = Vec::with_capacity(2 + MAX_NEXT);
    if let Some(prev) = previous {
        in_chain.insert(prev.doc.id.as_str());
        chain.push(prev.entry());
    }
    chain.push(ChainEntry {
        node: focus.clone(),
        stage: focus_stage,
        relation: None,
        direction: None,
    });

    let mut taken = 0;
    for next in following {
        if taken == MAX_NEXT {
            break;
        }
        if in_chain.insert(next.doc.id.as_str()) {
            chain.push(next.entry());
            taken += 1;
        }
    }

    let mut listed: HashSet<&str> = HashSet::new();
    let other = connections
        .iter()
        .filter(|c| !in_chain.contains(c.neighbor.id()))
        .filter(|c| listed.insert(c.neighbor.id()))
        .map(|c| OtherConnection {
            neighbor: c.neighbor.clone(),
            direction: c.direction,
            relation: describe_relation(&c.edge),
        })
        .collect();

    LifecycleChain { chain, other }
}

/// How many following stages the chain shows.
const MAX_NEXT: usize = 2;

/// A document connection annotated with its stage.
#[derive(Clone, Copy)]
struct Staged<'a> {
    conn: &'a Connection,
    doc: &'a DocumentNode,
    stage: LifecycleStage,
}

impl Staged<'_> {
    fn entry(&self) -> ChainEntry {
        ChainEntry {
            node: self.doc.clone(),
            stage: self.stage,
            relation: Some(describe_relation(&self.conn.edge)),
            direction: Some(self.conn.direction),
        }
    }
}

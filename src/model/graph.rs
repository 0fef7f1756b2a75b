//! GraphResult — one windowed page of the relationship graph.

use serde::{Deserialize, Serialize};

use super::{DocumentNode, NormalizedEdge, Node};
use crate::Result;

/// Window that produced a result, plus the unwindowed candidate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub limit: usize,
    pub offset: usize,
    /// Size of the full filtered candidate set before windowing.
    pub total: u64,
}

/// Edges of one window and every node they reference.
///
/// `nodes` never repeats an id. Edges may reference ids absent from `nodes`
/// when resolution missed them; consumers skip such endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphResult {
    pub edges: Vec<NormalizedEdge>,
    pub nodes: Vec<Node>,
    pub page: PageInfo,
}

impl GraphResult {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn document(&self, id: &str) -> Option<&DocumentNode> {
        self.node(id).and_then(Node::as_document)
    }

    /// True when another page follows this one.
    pub fn has_more(&self) -> bool {
        (self.page.offset.saturating_add(self.page.limit) as u64) < self.page.total
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| crate::Error::Serialization(e.to_string()))
    }
}

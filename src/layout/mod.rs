//! Deterministic radial layout.
//!
//! The focus node sits at the center; documents go on an inner ring and
//! persons on an outer ring. The rings are placed independently and never
//! avoid each other; the differing radii and start angles keep them apart.
//!
//! Pure functions: no I/O, no randomness. The same input always produces
//! bit-identical output.

use std::f64::consts::PI;

use hashbrown::HashMap;
use serde::Serialize;

use crate::config::ViewportConfig;
use crate::model::*;

pub const FOCUS_RADIUS: f64 = 26.0;
pub const DOCUMENT_RADIUS: f64 = 18.0;
pub const PERSON_RADIUS: f64 = 14.0;

/// Ring radius as a fraction of the shorter viewport side.
pub const DOCUMENT_RING: f64 = 0.28;
pub const PERSON_RING: f64 = 0.42;

pub const DOCUMENT_START_ANGLE: f64 = PI / 6.0;
pub const PERSON_START_ANGLE: f64 = PI / 3.0;

pub const DOCUMENT_COLOR: &str = "#f59e0b";
pub const PERSON_COLOR: &str = "#0ea5e9";

pub fn node_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => DOCUMENT_COLOR,
        NodeKind::Person => PERSON_COLOR,
    }
}

pub fn relation_color(rel: &RelationType) -> &'static str {
    match rel {
        RelationType::Reference => "#f59e0b",
        RelationType::PersonInvolved => "#10b981",
        RelationType::Speech => "#3b82f6",
        RelationType::Vote => "#ec4899",
        RelationType::Other(_) => "#94a3b8",
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The configured default canvas.
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.default_width, config.default_height)
    }

    /// Size a canvas to its container, never below the configured minimum.
    pub fn fit(width: f64, height: f64, config: &ViewportConfig) -> Self {
        Self::new(width.max(config.min_width), height.max(config.min_height))
    }
}

// ============================================================================
// Layout
// ============================================================================

/// A node with its position, radius and fill color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        self.node.id()
    }
}

/// Position every node around the focus.
///
/// The focus is the node whose id equals `focus_id`, or the first node when
/// there is no such node. A non-positive viewport side yields an empty layout.
pub fn layout(nodes: &[Node], focus_id: Option<&str>, width: f64, height: f64) -> Vec<PositionedNode> {
    // NaN sides fail `> 0.0` too.
    if !(width > 0.0 && height > 0.0) {
        return Vec::new();
    }
    let Some(focus) = focus_id
        .and_then(|id| nodes.iter().find(|n| n.id() == id))
        .or_else(|| nodes.first())
    else {
        return Vec::new();
    };

    let (cx, cy) = (width / 2.0, height / 2.0);
    let side = width.min(height);

    let others = nodes.iter().filter(|n| n.id() != focus.id());
    let (documents, persons): (Vec<&Node>, Vec<&Node>) =
        others.partition(|n| n.kind() == NodeKind::Document);

    let mut positioned = Vec::with_capacity(nodes.len());
    positioned.push(PositionedNode {
        node: focus.clone(),
        x: cx,
        y: cy,
        radius: FOCUS_RADIUS,
        color: node_color(focus.kind()),
    });

    let ring = Ring { cx, cy, radius: side * DOCUMENT_RING, start: DOCUMENT_START_ANGLE };
    positioned.extend(ring.place(&documents, DOCUMENT_RADIUS));

    let ring = Ring { cx, cy, radius: side * PERSON_RING, start: PERSON_START_ANGLE };
    positioned.extend(ring.place(&persons, PERSON_RADIUS));

    positioned
}

/// [`layout`] on a [`Viewport`].
pub fn layout_in(nodes: &[Node], focus_id: Option<&str>, viewport: Viewport) -> Vec<PositionedNode> {
    layout(nodes, focus_id, viewport.width, viewport.height)
}

struct Ring {
    cx: f64,
    cy: f64,
    radius: f64,
    start: f64,
}

impl Ring {
    fn place<'a>(&'a self, items: &'a [&Node], node_radius: f64) -> impl Iterator<Item = PositionedNode> + 'a {
        let step = 2.0 * PI / items.len().max(1) as f64;
        items.iter().enumerate().map(move |(idx, node)| {
            let angle = self.start + idx as f64 * step;
            PositionedNode {
                node: (*node).clone(),
                x: self.cx + self.radius * angle.cos(),
                y: self.cy + self.radius * angle.sin(),
                radius: node_radius,
                color: node_color(node.kind()),
            }
        })
    }
}

// ============================================================================
// Edge segments
// ============================================================================

/// A line to draw between two positioned nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub edge_id: String,
    pub relation_type: RelationType,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: &'static str,
}

/// Resolve edges to line segments. Edges with an endpoint that was not laid
/// out are skipped.
pub fn edge_segments(positioned: &[PositionedNode], edges: &[NormalizedEdge]) -> Vec<EdgeSegment> {
    let by_id: HashMap<&str, &PositionedNode> = positioned.iter().map(|p| (p.id(), p)).collect();

    edges
        .iter()
        .filter_map(|edge| {
            let src = by_id.get(edge.from_id.as_str())?;
            let dst = by_id.get(edge.to_id.as_str())?;
            Some(EdgeSegment {
                edge_id: edge.id.clone(),
                relation_type: edge.relation_type.clone(),
                x1: src.x,
                y1: src.y,
                x2: dst.x,
                y2: dst.y,
                color: relation_color(&edge.relation_type),
            })
        })
        .collect()
}

//! # Relationship Graph Model
//!
//! DTOs that cross every boundary: store ↔ query builder ↔ layout ↔ lifecycle.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod relationship;
pub mod node;
pub mod stage;
pub mod graph;

pub use relationship::{RelationType, RawEdge, NormalizedEdge, Direction};
pub use node::{Node, NodeKind, DocumentNode, PersonNode};
pub use stage::LifecycleStage;
pub use graph::{GraphResult, PageInfo};

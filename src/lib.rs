//! # legis-graph — Relationship Graph over Legislative Documents
//!
//! Builds, paginates and lays out a graph connecting documents (motions,
//! propositions, committee reports, decisions, votes) and persons
//! (officeholders) through typed relationships, and infers a document's
//! place in the legislative sequence from its neighbors.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `EdgeStore` is the contract between query builder and storage
//! 2. **Clean DTOs**: `RawEdge`, `NormalizedEdge`, `Node` cross all boundaries
//! 3. **Pure post-processing**: layout and lifecycle inference do no I/O and never fail
//! 4. **Lenient filters, strict focus**: bad filters fall back to defaults,
//!    a missing focus id is the only client error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use legis_graph::{GraphRequest, LifecycleChain, RelationGraph, layout};
//!
//! # async fn example() -> legis_graph::Result<()> {
//! let graph = RelationGraph::open_memory();
//!
//! let result = graph
//!     .build(&GraphRequest::new("H901FiU1").relation_types(["reference", "vote"]))
//!     .await?;
//!
//! let positioned = layout(&result.nodes, Some("H901FiU1"), 960.0, 620.0);
//! let chain = LifecycleChain::for_focus(&result, "H901FiU1");
//! # let _ = (positioned, chain);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod query;
pub mod layout;
pub mod lifecycle;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    RelationType, RawEdge, NormalizedEdge, Direction,
    Node, NodeKind, DocumentNode, PersonNode,
    LifecycleStage, GraphResult, PageInfo,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{EdgeStore, EdgeQuery, EdgeWindow, Window, MemoryEdgeStore};

// ============================================================================
// Re-exports: Query, Layout, Lifecycle, Config
// ============================================================================

pub use query::{GraphRequest, GraphQuery, build_graph};
pub use layout::{layout, edge_segments, PositionedNode, EdgeSegment, Viewport};
pub use lifecycle::{infer_chain, connections, Connection, ChainEntry, OtherConnection, LifecycleChain};
pub use config::{GraphConfig, QueryLimits};

// ============================================================================
// Top-level handle
// ============================================================================

/// The primary entry point. A `RelationGraph` wraps an edge store and the
/// configuration that governs request normalization.
pub struct RelationGraph<S: EdgeStore> {
    store: S,
    config: GraphConfig,
}

impl<S: EdgeStore> RelationGraph<S> {
    /// Create a graph over the given store with default configuration.
    pub fn with_store(store: S) -> Self {
        Self::with_config(store, GraphConfig::default())
    }

    pub fn with_config(store: S, config: GraphConfig) -> Self {
        Self { store, config }
    }

    /// Validate, normalize and run one graph request.
    pub async fn build(&self, request: &GraphRequest) -> Result<GraphResult> {
        build_graph(&self.store, request, &self.config.query).await
    }

    /// Access the underlying store (for loading data or advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

/// In-memory graph for testing and embedding.
impl RelationGraph<MemoryEdgeStore> {
    pub fn open_memory() -> Self {
        Self::with_store(MemoryEdgeStore::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request cannot be served as given; the caller must correct it.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The edge store or a node-resolution read failed. Retryable.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::DependencyUnavailable(_))
    }

    /// HTTP-equivalent status for surfacing the error to a client.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidArgument(_) => 400,
            Error::DependencyUnavailable(_) => 503,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Service Layer Error Types
//!
//! Error types for map service operations, covering the full failure
//! taxonomy the HTTP layer maps onto status codes: not-found, conflict,
//! limit, validation, and store failures.

use crate::db::StoreError;
use crate::models::ValidationError;
use thiserror::Error;

/// Map service operation errors.
#[derive(Error, Debug)]
pub enum MapServiceError {
    /// Map not found by id
    #[error("Map not found")]
    MapNotFound { id: String },

    /// Node not found within a map
    #[error("Node not found")]
    NodeNotFound { id: String },

    /// No link matched an exact source/target pair
    #[error("Connection not found")]
    LinkNotFound { source_id: String, target: String },

    /// A node with this id already exists in the map
    #[error("Node already exists")]
    DuplicateNode { id: String },

    /// Adding the node would exceed the per-map node cap
    #[error("Maximum nodes limit reached: {limit}")]
    NodeLimitExceeded { limit: usize },

    /// Creating the map would exceed the map count cap
    #[error("Maximum maps limit reached: {limit}")]
    MapLimitExceeded { limit: usize },

    /// An uploaded document failed import validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MapServiceError {
    /// Create a map not found error
    pub fn map_not_found(id: impl Into<String>) -> Self {
        Self::MapNotFound { id: id.into() }
    }

    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a link not found error
    pub fn link_not_found(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::LinkNotFound {
            source_id: source.into(),
            target: target.into(),
        }
    }

    /// Create a duplicate node error
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }
}

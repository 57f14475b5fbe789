//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `MapService` - map CRUD and node/link mutation with the
//!   load-modify-rewrite protocol
//! - `connection_query` - pure parent/child connection views over a loaded
//!   map
//!
//! Services coordinate between the storage layer and the HTTP API,
//! implementing business rules and owning the summary/document invariant.

pub mod connection_query;
pub mod error;
pub mod map_service;

pub use connection_query::{
    ConnectionInfo, ConnectionLists, ConnectionReport, Direction, EnrichedLink, LinkEndpoint,
    MapConnections,
};
pub use error::MapServiceError;
pub use map_service::{CreateMapRequest, CreateNodeRequest, MapLimits, MapService};

//! System Mapper Core Business Logic Layer
//!
//! This crate provides the data model, storage layer, and map services for
//! the System Mapper application: named graphs of nodes and links persisted
//! as whole-document JSON blobs in an embedded key-value store.
//!
//! # Architecture
//!
//! - **Whole-document storage**: each map is one JSON blob under `map:<id>`;
//!   a separate `maps:list` tree holds lightweight summaries for fast listing
//! - **Load-modify-rewrite**: every mutation loads the full document, mutates
//!   it in memory, and rewrites both the document and its summary
//! - **sled**: embedded key-value store, no external services required
//!
//! # Modules
//!
//! - [`models`] - Data structures (Map, Node, Link, MapSummary)
//! - [`services`] - Business services (MapService, connection queries)
//! - [`db`] - Storage layer with sled integration

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::{MapStore, StoreError};
pub use models::*;
pub use services::*;

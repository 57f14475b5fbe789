//! Data Structures
//!
//! Core model types for the System Mapper domain:
//!
//! - [`Map`] - the root aggregate: a named graph of nodes and links
//! - [`Node`] / [`Link`] - graph members, stored in insertion order
//! - [`MapSummary`] - lightweight listing record kept alongside each map
//! - [`NodePatch`] - partial update payload for node edits
//! - import document validation for bulk uploads

pub mod import;
pub mod map;
pub mod node;

pub use import::{validate_import, ImportedMap, ValidationError};
pub use map::{Link, Map, MapSummary};
pub use node::{Node, NodeAttribute, NodePatch};

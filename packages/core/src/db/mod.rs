//! Storage Layer
//!
//! This module handles all key-value store interactions using sled:
//!
//! - One entry per map in the default tree, key `map:<id>`, value the
//!   JSON-encoded full document
//! - A `maps:list` tree holding the JSON-encoded [`MapSummary`] for each
//!   map, keyed by map id
//!
//! sled was chosen for embedded deployment (no external store process) and
//! because its tree/key model maps one-to-one onto the hash-plus-string-keys
//! layout the application persists.

mod error;
mod map_store;

pub use error::StoreError;
pub use map_store::MapStore;

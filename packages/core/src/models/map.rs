//! Map Data Structures
//!
//! This module defines the [`Map`] root aggregate and its companions.
//!
//! # Architecture
//!
//! - **Whole-document aggregate**: a map owns its nodes and links and is
//!   persisted as a single JSON blob; there are no partial updates
//! - **Insertion order is display order**: nodes and links are ordered
//!   sequences, never sets or keyed collections
//! - **Redundant summary**: a [`MapSummary`] is recomputed from the full
//!   document and rewritten after every mutation so listings never need to
//!   load full documents
//!
//! # Examples
//!
//! ```rust
//! use sysmap_core::models::Map;
//!
//! let map = Map::new("map-1".to_string(), "Staging".to_string(), String::new());
//! assert_eq!(map.nodes.len(), 1); // seed node
//! assert_eq!(map.summary().node_count, 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::node::Node;

/// A directed edge between two node ids, read as "source is a parent of
/// target" in the UI.
///
/// No referential integrity is enforced at this level: self-links, duplicate
/// links, and links to ids with no matching node record are all
/// representable. Import validation is the only place endpoints are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Root aggregate: a named graph document persisted as one JSON blob.
///
/// # Fields
///
/// - `id`: unique key, `"map-" + creation timestamp` or `"default"`
/// - `name` / `description`: user-editable metadata
/// - `nodes`: ordered sequence of [`Node`]; insertion order = display order
/// - `links`: ordered sequence of [`Link`]
/// - `created` / `updated`: RFC 3339 timestamps; `updated` is refreshed on
///   every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub links: Vec<Link>,

    pub created: DateTime<Utc>,

    pub updated: DateTime<Utc>,
}

impl Map {
    /// Create a map with the default seed content: a single `Internet` node
    /// and no links.
    pub fn new(id: String, name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            nodes: vec![Node::seed()],
            links: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Create a map from caller-supplied content (bulk create / import).
    pub fn with_content(
        id: String,
        name: String,
        description: String,
        nodes: Vec<Node>,
        links: Vec<Link>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            nodes,
            links,
            created: now,
            updated: now,
        }
    }

    /// Look up a node by id.
    pub fn find_node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Whether a node with this id exists in the map.
    pub fn has_node(&self, node_id: &str) -> bool {
        self.find_node(node_id).is_some()
    }

    /// Refresh the `updated` timestamp. Called by every mutating service
    /// operation before the document is rewritten.
    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// Recompute the summary record for this map.
    ///
    /// Invariant: after every successful mutation,
    /// `summary.node_count == map.nodes.len()` and
    /// `summary.updated == map.updated`.
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            node_count: self.nodes.len(),
            updated: self.updated,
        }
    }
}

/// Lightweight listing record kept in the `maps:list` tree, one per map.
///
/// Stored redundantly so map enumeration never loads full documents. Always
/// derived from the full [`Map`] via [`Map::summary`], never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub node_count: usize,

    pub updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_has_seed_node() {
        let map = Map::new("map-1".to_string(), "Test".to_string(), String::new());

        assert_eq!(map.nodes.len(), 1);
        assert_eq!(map.nodes[0].id, "Internet");
        assert_eq!(map.nodes[0].group, "External");
        assert!(map.links.is_empty());
        assert_eq!(map.created, map.updated);
    }

    #[test]
    fn test_summary_matches_document() {
        let mut map = Map::new("map-1".to_string(), "Test".to_string(), String::new());
        map.nodes.push(Node::with_group("Router", "Hardware"));
        map.touch();

        let summary = map.summary();
        assert_eq!(summary.id, map.id);
        assert_eq!(summary.node_count, map.nodes.len());
        assert_eq!(summary.updated, map.updated);
    }

    #[test]
    fn test_touch_advances_updated() {
        let mut map = Map::new("map-1".to_string(), "Test".to_string(), String::new());
        let before = map.updated;

        map.touch();

        assert!(map.updated >= before);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let map = Map::new("map-1".to_string(), "Test".to_string(), String::new());
        let json = serde_json::to_value(map.summary()).unwrap();

        assert_eq!(json["nodeCount"], 1);
        assert!(json.get("node_count").is_none());
    }

    #[test]
    fn test_map_round_trips_through_json() {
        let mut map = Map::new("map-1".to_string(), "Test".to_string(), "desc".to_string());
        map.links.push(Link::new("Internet", "Internet")); // self-link is representable

        let json = serde_json::to_string(&map).unwrap();
        let back: Map = serde_json::from_str(&json).unwrap();

        assert_eq!(map, back);
    }

    #[test]
    fn test_find_node() {
        let map = Map::new("map-1".to_string(), "Test".to_string(), String::new());

        assert!(map.has_node("Internet"));
        assert!(!map.has_node("Router"));
        assert_eq!(map.find_node("Internet").unwrap().group, "External");
    }
}

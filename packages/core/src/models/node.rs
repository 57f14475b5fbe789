//! Node Data Structures
//!
//! A [`Node`] is a labeled vertex in a map: the `id` doubles as the display
//! name, `group` is a free-form category used by the renderer for coloring,
//! and `attributes` is an ordered list of ad-hoc name/value pairs.
//!
//! # Attributes are a list, not a mapping
//!
//! Duplicate attribute names are allowed and order is preserved, so the type
//! is `Vec<NodeAttribute>` rather than a map. Nothing validates attribute
//! content.

use serde::{Deserialize, Serialize};

fn default_group() -> String {
    "Default".to_string()
}

/// An ad-hoc name/value pair attached to a node. No schema, duplicates
/// allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttribute {
    pub name: String,
    pub value: String,
}

impl NodeAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A labeled vertex within a map.
///
/// # Fields
///
/// - `id`: unique within the map (enforced on create); doubles as the
///   display name
/// - `group`: free-form category label, only meaningful to the renderer;
///   missing values deserialize to `"Default"`
/// - `description`: optional free text
/// - `attributes`: ordered name/value pairs, duplicates allowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(default = "default_group")]
    pub group: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub attributes: Vec<NodeAttribute>,
}

impl Node {
    /// Create a node with the given id and the default group.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: default_group(),
            description: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a node with an explicit group.
    pub fn with_group(id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            description: String::new(),
            attributes: Vec::new(),
        }
    }

    /// The seed node every freshly created map starts with.
    pub fn seed() -> Self {
        Self::with_group("Internet", "External")
    }
}

/// Partial node update payload for PUT operations.
///
/// All fields are optional: provided fields overwrite, absent fields are
/// retained (shallow merge). `parent_nodes` is never stored on the node —
/// when present it triggers a full replacement of the node's incoming links:
///
/// - `None`: existing links are left untouched
/// - `Some(ids)`: every link targeting this node is removed, then one link is
///   added per parent id that resolves to an existing node (blank and
///   unresolvable ids are silently dropped). `Some(vec![])` therefore clears
///   all incoming links.
///
/// Note the asymmetry with node creation, where parent ids are linked
/// without any existence check. Both behaviors are part of the wire
/// contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    /// Rename the node. Links are NOT rewritten to follow the new id; the
    /// update addresses links by the id the node had before the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<NodeAttribute>>,

    /// Replacement set of parent node ids; see the type-level docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_nodes: Option<Vec<String>>,
}

impl NodePatch {
    /// Whether the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.group.is_none()
            && self.description.is_none()
            && self.attributes.is_none()
            && self.parent_nodes.is_none()
    }
}

//! Import Document Validation
//!
//! Bulk upload accepts an arbitrary JSON document and turns it into the
//! content of a new map. Unlike the regular create path, import DOES check
//! referential integrity: every link endpoint must resolve to a node id
//! declared in the same document.
//!
//! Validation operates on raw `serde_json::Value` rather than typed
//! deserialization so error messages can point at the offending entry.

use serde_json::Value;
use thiserror::Error;

use crate::models::map::Link;
use crate::models::node::Node;

/// Validation errors for uploaded map documents.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Map document must be a JSON object")]
    NotAnObject,

    #[error("Map document requires a 'nodes' array")]
    MissingNodes,

    #[error("Node at index {index} must be an object with a string 'id'")]
    InvalidNode { index: usize },

    #[error("'links' must be an array")]
    InvalidLinks,

    #[error("Link at index {index} must be an object with string 'source' and 'target'")]
    InvalidLink { index: usize },

    #[error("Link at index {index} references unknown node '{node_id}'")]
    UnresolvedLink { index: usize, node_id: String },
}

/// The parsed content of a valid import document, ready to hand to
/// `MapService::create_map`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMap {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Validate an uploaded JSON document as map content.
///
/// Checks, in order:
///
/// 1. the document is an object with an array `nodes`
/// 2. every node is an object carrying a string `id`
/// 3. `links`, when present, is an array of objects with string
///    `source`/`target`, both resolving to node ids from step 2
///
/// Extra fields on nodes and links are tolerated; node `group`,
/// `description`, and `attributes` fall back to their usual defaults.
pub fn validate_import(doc: &Value) -> Result<ImportedMap, ValidationError> {
    let obj = doc.as_object().ok_or(ValidationError::NotAnObject)?;

    let raw_nodes = obj
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingNodes)?;

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    for (index, raw) in raw_nodes.iter().enumerate() {
        if !raw.get("id").map(Value::is_string).unwrap_or(false) {
            return Err(ValidationError::InvalidNode { index });
        }
        let node: Node = serde_json::from_value(raw.clone())
            .map_err(|_| ValidationError::InvalidNode { index })?;
        nodes.push(node);
    }

    let mut links = Vec::new();
    if let Some(raw_links) = obj.get("links") {
        let raw_links = raw_links.as_array().ok_or(ValidationError::InvalidLinks)?;

        links.reserve(raw_links.len());
        for (index, raw) in raw_links.iter().enumerate() {
            let source = raw.get("source").and_then(Value::as_str);
            let target = raw.get("target").and_then(Value::as_str);
            let (source, target) = match (source, target) {
                (Some(s), Some(t)) => (s, t),
                _ => return Err(ValidationError::InvalidLink { index }),
            };

            for endpoint in [source, target] {
                if !nodes.iter().any(|n| n.id == endpoint) {
                    return Err(ValidationError::UnresolvedLink {
                        index,
                        node_id: endpoint.to_string(),
                    });
                }
            }
            links.push(Link::new(source, target));
        }
    }

    Ok(ImportedMap {
        name: obj
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        nodes,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document() {
        let doc = json!({
            "name": "Imported",
            "nodes": [
                { "id": "Internet", "group": "External" },
                { "id": "Router", "group": "Hardware" }
            ],
            "links": [
                { "source": "Internet", "target": "Router" }
            ]
        });

        let imported = validate_import(&doc).unwrap();
        assert_eq!(imported.name.as_deref(), Some("Imported"));
        assert_eq!(imported.nodes.len(), 2);
        assert_eq!(imported.links, vec![Link::new("Internet", "Router")]);
    }

    #[test]
    fn test_nodes_array_required() {
        assert_eq!(
            validate_import(&json!({ "links": [] })),
            Err(ValidationError::MissingNodes)
        );
        assert_eq!(
            validate_import(&json!({ "nodes": "nope" })),
            Err(ValidationError::MissingNodes)
        );
        assert_eq!(validate_import(&json!([1, 2])), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn test_node_requires_string_id() {
        let doc = json!({ "nodes": [{ "id": 42 }] });
        assert_eq!(
            validate_import(&doc),
            Err(ValidationError::InvalidNode { index: 0 })
        );

        let doc = json!({ "nodes": [{ "group": "External" }] });
        assert_eq!(
            validate_import(&doc),
            Err(ValidationError::InvalidNode { index: 0 })
        );
    }

    #[test]
    fn test_link_endpoints_must_resolve() {
        let doc = json!({
            "nodes": [{ "id": "Internet" }],
            "links": [{ "source": "Internet", "target": "Router" }]
        });

        assert_eq!(
            validate_import(&doc),
            Err(ValidationError::UnresolvedLink {
                index: 0,
                node_id: "Router".to_string()
            })
        );
    }

    #[test]
    fn test_links_optional() {
        let doc = json!({ "nodes": [{ "id": "Internet" }] });
        let imported = validate_import(&doc).unwrap();
        assert!(imported.links.is_empty());
    }

    #[test]
    fn test_renderer_fields_are_tolerated() {
        // Exports from a live renderer may carry transient coordinates; they
        // must not block re-import.
        let doc = json!({
            "nodes": [{ "id": "Internet", "group": "External", "x": 12.5, "y": -3.0 }],
            "links": []
        });

        let imported = validate_import(&doc).unwrap();
        assert_eq!(imported.nodes[0].id, "Internet");
    }
}

//! Connection Queries
//!
//! Pure, read-only views over an already-loaded [`Map`]: the parent/child
//! breakdown for one node, and the enriched listing of every link.
//!
//! All lookups are naive scans over `map.links` and `map.nodes` — maps are
//! small (tens to low hundreds of nodes), so no index or cache is kept.
//! Dangling link endpoints degrade to an `"Unknown"` type rather than
//! erroring; stale references are a displayable condition, not a failure.

use serde::{Deserialize, Serialize};

use crate::models::{Map, Node, NodeAttribute};

/// Fallback type label for link endpoints with no matching node record.
const UNKNOWN_TYPE: &str = "Unknown";

/// Which side of a link a connection entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Parent,
    Child,
}

/// One connected neighbor of a node, enriched with that neighbor's group
/// and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub id: String,
    /// Node ids double as display names.
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub direction: Direction,
    pub attributes: Vec<NodeAttribute>,
}

/// The three connection lists of a report. `all` is always
/// `parents ++ children`, each sub-list in original link order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionLists {
    pub parents: Vec<ConnectionInfo>,
    pub children: Vec<ConnectionInfo>,
    pub all: Vec<ConnectionInfo>,
}

/// Computed parent/child breakdown for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub node_id: String,
    pub node_name: String,
    pub node_type: String,
    pub total_connections: usize,
    pub parent_count: usize,
    pub child_count: usize,
    pub connections: ConnectionLists,
}

/// One endpoint of an enriched link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEndpoint {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub attributes: Vec<NodeAttribute>,
}

/// A link with both endpoints resolved against the map's current nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLink {
    pub source: LinkEndpoint,
    pub target: LinkEndpoint,
    /// Human-readable `"<source> → <target>"` label.
    pub relationship: String,
}

/// The full-map connection listing returned by the connections endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConnections {
    pub map_id: String,
    pub total_connections: usize,
    pub connections: Vec<EnrichedLink>,
}

fn connection_info(map: &Map, neighbor_id: &str, direction: Direction) -> ConnectionInfo {
    let neighbor = map.find_node(neighbor_id);
    ConnectionInfo {
        id: neighbor_id.to_string(),
        name: neighbor_id.to_string(),
        node_type: neighbor
            .map(|n| n.group.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        direction,
        attributes: neighbor.map(|n| n.attributes.clone()).unwrap_or_default(),
    }
}

fn endpoint(map: &Map, node_id: &str) -> LinkEndpoint {
    let node = map.find_node(node_id);
    LinkEndpoint {
        id: node_id.to_string(),
        name: node_id.to_string(),
        node_type: node
            .map(|n| n.group.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        attributes: node.map(|n| n.attributes.clone()).unwrap_or_default(),
    }
}

/// Compute the connection report for one node, `None` if the node is not
/// present in the map.
///
/// Parents are links with `target == node_id`, children links with
/// `source == node_id`, each preserving link order and enriched with the
/// neighbor's group and attributes.
pub fn connections_for_node(map: &Map, node_id: &str) -> Option<ConnectionReport> {
    let node: &Node = map.find_node(node_id)?;

    let parents: Vec<ConnectionInfo> = map
        .links
        .iter()
        .filter(|link| link.target == node_id)
        .map(|link| connection_info(map, &link.source, Direction::Parent))
        .collect();

    let children: Vec<ConnectionInfo> = map
        .links
        .iter()
        .filter(|link| link.source == node_id)
        .map(|link| connection_info(map, &link.target, Direction::Child))
        .collect();

    let mut all = Vec::with_capacity(parents.len() + children.len());
    all.extend(parents.iter().cloned());
    all.extend(children.iter().cloned());

    Some(ConnectionReport {
        node_id: node_id.to_string(),
        node_name: node.id.clone(),
        node_type: node.group.clone(),
        total_connections: parents.len() + children.len(),
        parent_count: parents.len(),
        child_count: children.len(),
        connections: ConnectionLists {
            parents,
            children,
            all,
        },
    })
}

/// Enrich every link of the map with its endpoints' current node records.
pub fn all_connections(map: &Map) -> Vec<EnrichedLink> {
    map.links
        .iter()
        .map(|link| EnrichedLink {
            source: endpoint(map, &link.source),
            target: endpoint(map, &link.target),
            relationship: format!("{} → {}", link.source, link.target),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Link;

    fn sample_map() -> Map {
        let mut map = Map::new("map-1".to_string(), "Test".to_string(), String::new());
        map.nodes.push(Node::with_group("Router", "Hardware"));
        map.nodes.push(Node::with_group("Server", "Hardware"));
        map.links.push(Link::new("Internet", "Router"));
        map.links.push(Link::new("Router", "Server"));
        map
    }

    #[test]
    fn test_report_counts_and_ordering() {
        let map = sample_map();
        let report = connections_for_node(&map, "Router").unwrap();

        assert_eq!(report.node_name, "Router");
        assert_eq!(report.node_type, "Hardware");
        assert_eq!(report.parent_count, 1);
        assert_eq!(report.child_count, 1);
        assert_eq!(report.total_connections, 2);

        assert_eq!(report.connections.parents[0].id, "Internet");
        assert_eq!(report.connections.children[0].id, "Server");

        // all = parents ++ children, sub-list order preserved
        let all_ids: Vec<&str> = report
            .connections
            .all
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(all_ids, vec!["Internet", "Server"]);
        assert_eq!(
            report.total_connections,
            report.connections.all.len()
        );
    }

    #[test]
    fn test_missing_node_yields_none() {
        let map = sample_map();
        assert!(connections_for_node(&map, "Laptop").is_none());
    }

    #[test]
    fn test_dangling_reference_degrades_to_unknown() {
        let mut map = sample_map();
        map.links.push(Link::new("Ghost", "Router"));

        let report = connections_for_node(&map, "Router").unwrap();
        let ghost = &report.connections.parents[1];

        assert_eq!(ghost.id, "Ghost");
        assert_eq!(ghost.node_type, "Unknown");
        assert!(ghost.attributes.is_empty());
    }

    #[test]
    fn test_neighbor_attributes_are_carried() {
        let mut map = sample_map();
        map.nodes[0]
            .attributes
            .push(NodeAttribute::new("provider", "upstream"));

        let report = connections_for_node(&map, "Router").unwrap();
        assert_eq!(
            report.connections.parents[0].attributes,
            vec![NodeAttribute::new("provider", "upstream")]
        );
    }

    #[test]
    fn test_all_connections_enriches_both_endpoints() {
        let map = sample_map();
        let links = all_connections(&map);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].source.node_type, "External");
        assert_eq!(links[0].target.node_type, "Hardware");
        assert_eq!(links[0].relationship, "Internet → Router");
    }

    #[test]
    fn test_all_connections_with_dangling_endpoint() {
        let mut map = sample_map();
        map.links.push(Link::new("Router", "Ghost"));

        let links = all_connections(&map);
        let last = links.last().unwrap();

        assert_eq!(last.target.node_type, "Unknown");
        assert_eq!(last.relationship, "Router → Ghost");
    }

    #[test]
    fn test_self_link_counts_as_parent_and_child() {
        let mut map = sample_map();
        map.links.push(Link::new("Router", "Router"));

        let report = connections_for_node(&map, "Router").unwrap();
        assert_eq!(report.parent_count, 2);
        assert_eq!(report.child_count, 2);
        assert_eq!(report.total_connections, 4);
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let map = sample_map();
        let report = connections_for_node(&map, "Router").unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["nodeId"], "Router");
        assert_eq!(json["totalConnections"], 2);
        assert_eq!(json["connections"]["parents"][0]["type"], "External");
        assert_eq!(json["connections"]["parents"][0]["direction"], "parent");
    }
}

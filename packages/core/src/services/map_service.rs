//! Map Service - Core CRUD Operations
//!
//! The main business logic layer for map operations:
//!
//! - Map CRUD (list, get, create, update metadata, delete)
//! - Node and link mutation within a map
//! - Bulk import of uploaded map documents
//! - Default-map bootstrap on first start
//!
//! # Write protocol
//!
//! Every mutation follows the same sequence: load the full document, mutate
//! it in memory, refresh `updated`, rewrite the full document, then
//! recompute and rewrite the summary. The summary/document invariant
//! (`node_count` and `updated` agree) holds after every successful call; a
//! crash between the two writes leaves them inconsistent and nothing
//! repairs that.
//!
//! # Concurrency
//!
//! There is NO locking across the load-modify-rewrite sequence. Two
//! concurrent mutations to the same map id both load the same prior
//! document and the second write discards the first's changes. This
//! lost-update window is an accepted property of the whole-document design,
//! kept rather than papered over with a lock.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::MapStore;
use crate::models::{validate_import, Link, Map, MapSummary, Node, NodeAttribute, NodePatch};
use crate::services::connection_query::{self, ConnectionReport, MapConnections};
use crate::services::MapServiceError;

/// Count caps applied by the service. `0` means unlimited, matching the
/// configuration convention of the HTTP server.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapLimits {
    pub max_maps: usize,
    pub max_nodes_per_map: usize,
}

/// Payload for creating a map. Every field is optional; omitted nodes get
/// the single seed node, omitted links an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMapRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

/// Payload for adding a node to a map.
///
/// `parent_nodes` appends one link `parent → new node` per entry, with no
/// check that the parent exists — dangling links are permitted here,
/// deliberately unlike the update path (see [`NodePatch`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Explicit node id; empty or missing means one is generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<NodeAttribute>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_nodes: Option<Vec<String>>,
}

/// CRUD operations over the map store.
///
/// Cheap to clone; the underlying store handle is shared.
#[derive(Debug, Clone)]
pub struct MapService {
    store: MapStore,
    limits: MapLimits,
}

impl MapService {
    pub fn new(store: MapStore) -> Self {
        Self::with_limits(store, MapLimits::default())
    }

    pub fn with_limits(store: MapStore, limits: MapLimits) -> Self {
        Self { store, limits }
    }

    /// Liveness probe passed through to the store, for the health endpoint.
    pub fn ping(&self) -> Result<(), MapServiceError> {
        Ok(self.store.ping()?)
    }

    /// Seed the `default` map when the store holds no summaries at all.
    ///
    /// Returns whether a map was created. Runs once at startup; an empty
    /// summaries tree is what a fresh (or fully emptied) store looks like.
    pub fn bootstrap(&self, default_name: &str) -> Result<bool, MapServiceError> {
        if self.store.has_summaries() {
            return Ok(false);
        }

        let now = Utc::now();
        let map = Map {
            id: "default".to_string(),
            name: default_name.to_string(),
            description: "Default system map".to_string(),
            nodes: vec![
                Node::with_group("Internet", "External"),
                Node::with_group("Router", "Hardware"),
            ],
            links: vec![Link::new("Internet", "Router")],
            created: now,
            updated: now,
        };

        self.store.put_map(&map)?;
        self.store.put_summary(&map.summary())?;

        tracing::info!("Default map created");
        Ok(true)
    }

    /// All map summaries, in store iteration order.
    pub fn list_maps(&self) -> Result<Vec<MapSummary>, MapServiceError> {
        Ok(self.store.list_summaries()?)
    }

    /// Load a full map document.
    pub fn get_map(&self, map_id: &str) -> Result<Map, MapServiceError> {
        self.load(map_id)
    }

    /// Create a map from the request, filling in defaults: name
    /// `"Untitled Map"`, a single seed node, no links. Assigns a fresh
    /// `map-<timestamp>` id.
    pub fn create_map(&self, req: CreateMapRequest) -> Result<Map, MapServiceError> {
        if self.limits.max_maps > 0 && self.store.summary_count() >= self.limits.max_maps {
            return Err(MapServiceError::MapLimitExceeded {
                limit: self.limits.max_maps,
            });
        }

        let nodes = req.nodes.unwrap_or_else(|| vec![Node::seed()]);
        if self.limits.max_nodes_per_map > 0 && nodes.len() > self.limits.max_nodes_per_map {
            return Err(MapServiceError::NodeLimitExceeded {
                limit: self.limits.max_nodes_per_map,
            });
        }

        let map = Map::with_content(
            self.fresh_map_id()?,
            req.name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Untitled Map".to_string()),
            req.description.unwrap_or_default(),
            nodes,
            req.links.unwrap_or_default(),
        );

        self.store.put_map(&map)?;
        self.store.put_summary(&map.summary())?;

        tracing::info!(map_id = %map.id, "Map created");
        Ok(map)
    }

    /// Validate an uploaded document and create a map from its content.
    ///
    /// The new map gets a fresh id and timestamps; nodes and links are taken
    /// verbatim from the document.
    pub fn import_map(&self, doc: &Value) -> Result<Map, MapServiceError> {
        let imported = validate_import(doc)?;
        self.create_map(CreateMapRequest {
            name: imported.name,
            description: imported.description,
            nodes: Some(imported.nodes),
            links: Some(imported.links),
        })
    }

    /// Update map name and/or description. Nodes, links, and `created` are
    /// untouched.
    pub fn update_map_metadata(
        &self,
        map_id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Map, MapServiceError> {
        let mut map = self.load(map_id)?;

        if let Some(name) = name {
            map.name = name;
        }
        if let Some(description) = description {
            map.description = description;
        }

        self.persist(&mut map)?;
        tracing::info!(map_id = %map.id, "Map metadata updated");
        Ok(map)
    }

    /// Delete a map: both the summary entry and the full document.
    ///
    /// Fails with `MapNotFound` when the full document is absent; a
    /// summary-only remnant is not separately checked.
    pub fn delete_map(&self, map_id: &str) -> Result<(), MapServiceError> {
        if !self.store.contains_map(map_id)? {
            return Err(MapServiceError::map_not_found(map_id));
        }

        self.store.delete_summary(map_id)?;
        self.store.delete_map(map_id)?;

        tracing::info!(%map_id, "Map deleted");
        Ok(())
    }

    /// Add a node to a map, optionally linking it under parent nodes.
    ///
    /// Parent ids are linked WITHOUT an existence check; unresolvable
    /// parents produce dangling links by design.
    pub fn add_node(
        &self,
        map_id: &str,
        req: CreateNodeRequest,
    ) -> Result<Node, MapServiceError> {
        let mut map = self.load(map_id)?;

        let id = match req.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => Self::fresh_node_id(&map),
        };

        if map.has_node(&id) {
            return Err(MapServiceError::duplicate_node(id));
        }

        if self.limits.max_nodes_per_map > 0
            && map.nodes.len() >= self.limits.max_nodes_per_map
        {
            return Err(MapServiceError::NodeLimitExceeded {
                limit: self.limits.max_nodes_per_map,
            });
        }

        let node = Node {
            id: id.clone(),
            group: req
                .group
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| "Default".to_string()),
            description: req.description.unwrap_or_default(),
            attributes: req.attributes.unwrap_or_default(),
        };
        map.nodes.push(node.clone());

        for parent_id in req.parent_nodes.unwrap_or_default() {
            map.links.push(Link::new(parent_id, id.clone()));
        }

        self.persist(&mut map)?;
        tracing::info!(map_id = %map.id, node_id = %id, "Node added");
        Ok(node)
    }

    /// Apply a partial update to a node (shallow merge), optionally
    /// replacing its incoming links.
    ///
    /// When `parent_nodes` is present, every link targeting `node_id` is
    /// removed first, then one link is added per parent id that is
    /// non-blank AND resolves to an existing node — unresolvable parents
    /// are silently dropped here, unlike the add path. Link replacement
    /// addresses the node by its pre-patch id even if the patch renames it.
    pub fn update_node(
        &self,
        map_id: &str,
        node_id: &str,
        patch: NodePatch,
    ) -> Result<Node, MapServiceError> {
        let mut map = self.load(map_id)?;

        let index = map
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| MapServiceError::node_not_found(node_id))?;

        {
            let node = &mut map.nodes[index];
            if let Some(id) = patch.id {
                node.id = id;
            }
            if let Some(group) = patch.group {
                node.group = group;
            }
            if let Some(description) = patch.description {
                node.description = description;
            }
            if let Some(attributes) = patch.attributes {
                node.attributes = attributes;
            }
        }

        if let Some(parents) = patch.parent_nodes {
            map.links.retain(|link| link.target != node_id);

            for parent_id in parents {
                if parent_id.trim().is_empty() {
                    continue;
                }
                if map.nodes.iter().any(|n| n.id == parent_id) {
                    map.links.push(Link::new(parent_id, node_id));
                }
            }
        }

        self.persist(&mut map)?;
        tracing::info!(map_id = %map.id, %node_id, "Node updated");
        Ok(map.nodes[index].clone())
    }

    /// Remove a node and every link where it is source or target.
    ///
    /// Deleting an absent node is a no-op that still refreshes `updated`;
    /// only a missing MAP is an error.
    pub fn delete_node(&self, map_id: &str, node_id: &str) -> Result<(), MapServiceError> {
        let mut map = self.load(map_id)?;

        map.nodes.retain(|n| n.id != node_id);
        map.links
            .retain(|l| l.source != node_id && l.target != node_id);

        self.persist(&mut map)?;
        tracing::info!(map_id = %map.id, %node_id, "Node deleted");
        Ok(())
    }

    /// Remove every link exactly matching the source/target pair. Fails
    /// with `LinkNotFound` when nothing matched. Returns the number of
    /// links remaining in the map.
    pub fn delete_link(
        &self,
        map_id: &str,
        source: &str,
        target: &str,
    ) -> Result<usize, MapServiceError> {
        let mut map = self.load(map_id)?;

        let before = map.links.len();
        map.links
            .retain(|l| !(l.source == source && l.target == target));

        if map.links.len() == before {
            return Err(MapServiceError::link_not_found(source, target));
        }

        self.persist(&mut map)?;
        tracing::info!(map_id = %map.id, %source, %target, "Connection removed");
        Ok(map.links.len())
    }

    /// Connection report for one node of a map.
    pub fn node_connections(
        &self,
        map_id: &str,
        node_id: &str,
    ) -> Result<ConnectionReport, MapServiceError> {
        let map = self.load(map_id)?;
        connection_query::connections_for_node(&map, node_id)
            .ok_or_else(|| MapServiceError::node_not_found(node_id))
    }

    /// Enriched listing of every link in a map.
    pub fn map_connections(&self, map_id: &str) -> Result<MapConnections, MapServiceError> {
        let map = self.load(map_id)?;
        let connections = connection_query::all_connections(&map);

        Ok(MapConnections {
            map_id: map.id,
            total_connections: connections.len(),
            connections,
        })
    }

    fn load(&self, map_id: &str) -> Result<Map, MapServiceError> {
        self.store
            .get_map(map_id)?
            .ok_or_else(|| MapServiceError::map_not_found(map_id))
    }

    /// Rewrite the full document, then recompute and rewrite its summary.
    fn persist(&self, map: &mut Map) -> Result<(), MapServiceError> {
        map.touch();
        self.store.put_map(map)?;
        self.store.put_summary(&map.summary())?;
        Ok(())
    }

    /// Next free `map-<timestamp>` id. Millisecond timestamps collide under
    /// back-to-back creates, so probe the store and bump until free.
    fn fresh_map_id(&self) -> Result<String, MapServiceError> {
        let mut ts = Utc::now().timestamp_millis();
        loop {
            let id = format!("map-{ts}");
            if !self.store.contains_map(&id)? {
                return Ok(id);
            }
            ts += 1;
        }
    }

    /// Next free `node-<timestamp>` id within a map.
    fn fresh_node_id(map: &Map) -> String {
        let mut ts = Utc::now().timestamp_millis();
        loop {
            let id = format!("node-{ts}");
            if !map.has_node(&id) {
                return id;
            }
            ts += 1;
        }
    }
}

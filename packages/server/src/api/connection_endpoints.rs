//! Connection query and link removal endpoints.
//!
//! # Endpoints
//!
//! - `GET /api/maps/:id/nodes/:nodeId/connections` - parent/child report
//!   for one node
//! - `GET /api/maps/:id/connections` - enriched listing of every link
//! - `DELETE /api/maps/:id/connections` - remove an exact source/target link

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};

use sysmap_core::{ConnectionReport, MapConnections};

use crate::api::{ApiError, AppState};

/// Body for `DELETE /api/maps/:id/connections`. Both fields are required;
/// blank values are rejected before the service is consulted.
#[derive(Debug, Deserialize)]
pub struct RemoveConnectionRequest {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemovedConnection {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveConnectionResponse {
    pub message: String,
    pub removed_connection: RemovedConnection,
    pub remaining_links: usize,
}

async fn node_connections(
    State(state): State<AppState>,
    Path((map_id, node_id)): Path<(String, String)>,
) -> Result<Json<ConnectionReport>, ApiError> {
    tracing::debug!(%map_id, %node_id, "Fetching connections for node");
    let report = state.service.node_connections(&map_id, &node_id)?;
    tracing::debug!(
        "Found {} connections for node {}",
        report.total_connections,
        node_id
    );
    Ok(Json(report))
}

async fn map_connections(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<Json<MapConnections>, ApiError> {
    tracing::debug!(%map_id, "Fetching all connections for map");
    let connections = state.service.map_connections(&map_id)?;
    Ok(Json(connections))
}

async fn remove_connection(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
    Json(req): Json<RemoveConnectionRequest>,
) -> Result<Json<RemoveConnectionResponse>, ApiError> {
    let (source, target) = match (
        req.source.filter(|s| !s.is_empty()),
        req.target.filter(|t| !t.is_empty()),
    ) {
        (Some(source), Some(target)) => (source, target),
        _ => return Err(ApiError::bad_request("Source and target are required")),
    };

    tracing::debug!(%map_id, %source, %target, "Removing connection");
    let remaining_links = state.service.delete_link(&map_id, &source, &target)?;

    Ok(Json(RemoveConnectionResponse {
        message: "Connection removed successfully".to_string(),
        removed_connection: RemovedConnection { source, target },
        remaining_links,
    }))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/maps/:id/nodes/:node_id/connections",
            get(node_connections),
        )
        .route("/api/maps/:id/connections", get(map_connections))
        .route("/api/maps/:id/connections", delete(remove_connection))
        .with_state(state)
}

//! Node mutation endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/maps/:id/nodes` - add a node (optionally under parents)
//! - `PUT /api/maps/:id/nodes/:nodeId` - partial node update
//! - `DELETE /api/maps/:id/nodes/:nodeId` - delete a node and its links

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, post, put},
    Router,
};

use sysmap_core::{CreateNodeRequest, Node, NodePatch};

use crate::api::{ApiError, AppState};

async fn add_node(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
    body: Option<Json<CreateNodeRequest>>,
) -> Result<(StatusCode, Json<Node>), ApiError> {
    tracing::debug!(%map_id, "Adding node to map");
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let node = state.service.add_node(&map_id, req)?;
    Ok((StatusCode::CREATED, Json(node)))
}

async fn update_node(
    State(state): State<AppState>,
    Path((map_id, node_id)): Path<(String, String)>,
    Json(patch): Json<NodePatch>,
) -> Result<Json<Node>, ApiError> {
    tracing::debug!(%map_id, %node_id, "Updating node");
    let node = state.service.update_node(&map_id, &node_id, patch)?;
    Ok(Json(node))
}

async fn delete_node(
    State(state): State<AppState>,
    Path((map_id, node_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(%map_id, %node_id, "Deleting node");
    state.service.delete_node(&map_id, &node_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/maps/:id/nodes", post(add_node))
        .route("/api/maps/:id/nodes/:node_id", put(update_node))
        .route("/api/maps/:id/nodes/:node_id", delete(delete_node))
        .with_state(state)
}

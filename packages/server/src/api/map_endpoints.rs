//! Map CRUD endpoints, import/export, and the health check.
//!
//! # Endpoints
//!
//! - `GET /api/maps` - list map summaries
//! - `GET /api/maps/:id` - fetch a full map document
//! - `POST /api/maps` - create a map (body optional field by field)
//! - `POST /api/maps/import` - validate an uploaded document and create a map
//! - `PUT /api/maps/:id` - update map name/description
//! - `DELETE /api/maps/:id` - delete a map
//! - `GET /api/maps/:id/export` - download the map document as a JSON file
//! - `GET /health` - store liveness probe

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use sysmap_core::{CreateMapRequest, Map, MapSummary};

use crate::api::{ApiError, AppState};

/// Body for `PUT /api/maps/:id`. Only name and description may change.
#[derive(Debug, Deserialize)]
pub struct UpdateMapRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Response for `PUT /api/maps/:id` — the updated metadata, without the
/// node/link payload.
#[derive(Debug, Serialize)]
pub struct MapMetadataResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub updated: DateTime<Utc>,
}

impl From<Map> for MapMetadataResponse {
    fn from(map: Map) -> Self {
        Self {
            id: map.id,
            name: map.name,
            description: map.description,
            updated: map.updated,
        }
    }
}

async fn list_maps(State(state): State<AppState>) -> Result<Json<Vec<MapSummary>>, ApiError> {
    tracing::debug!("Fetching all maps");
    let maps = state.service.list_maps()?;
    tracing::debug!("Found {} maps", maps.len());
    Ok(Json(maps))
}

async fn get_map(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<Json<Map>, ApiError> {
    tracing::debug!(%map_id, "Fetching map");
    let map = state.service.get_map(&map_id)?;
    Ok(Json(map))
}

async fn create_map(
    State(state): State<AppState>,
    body: Option<Json<CreateMapRequest>>,
) -> Result<(StatusCode, Json<Map>), ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let map = state.service.create_map(req)?;
    Ok((StatusCode::CREATED, Json(map)))
}

async fn import_map(
    State(state): State<AppState>,
    Json(doc): Json<Value>,
) -> Result<(StatusCode, Json<Map>), ApiError> {
    let map = state.service.import_map(&doc)?;
    Ok((StatusCode::CREATED, Json(map)))
}

async fn update_map(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
    Json(req): Json<UpdateMapRequest>,
) -> Result<Json<MapMetadataResponse>, ApiError> {
    let map = state
        .service
        .update_map_metadata(&map_id, req.name, req.description)?;
    Ok(Json(map.into()))
}

async fn delete_map(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_map(&map_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Serve the map document with a download disposition so the browser saves
/// it as `<name>.json`. Renderer-transient fields never reach the store, so
/// the stored document is already export-clean.
async fn export_map(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<Response, ApiError> {
    let map = state.service.get_map(&map_id)?;

    let filename = format!("attachment; filename=\"{}.json\"", map.name.replace('"', ""));
    let disposition = HeaderValue::from_str(&filename)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"map.json\""));

    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(map),
    )
        .into_response())
}

async fn health(State(state): State<AppState>) -> Response {
    match state.service.ping() {
        Ok(()) => Json(json!({
            "status": "healthy",
            "timestamp": Utc::now(),
            "version": env!("CARGO_PKG_VERSION"),
            "store": "connected",
        }))
        .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "timestamp": Utc::now(),
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/maps", get(list_maps))
        .route("/api/maps", post(create_map))
        .route("/api/maps/import", post(import_map))
        .route("/api/maps/:id", get(get_map))
        .route("/api/maps/:id", put(update_map))
        .route("/api/maps/:id", delete(delete_map))
        .route("/api/maps/:id/export", get(export_map))
        .route("/health", get(health))
        .with_state(state)
}

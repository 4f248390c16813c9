//! Estate, tree, statistics and drone plan endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use estate_core::{
    validate_max_distance, validate_placement, CreateEstateRequest, CreateTreeRequest,
    CreatedResponse, DronePlanResponse, Estate, StatsResult, ValidationError,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::state::{AppState, PlantTreeOutcome};

#[derive(Debug, Deserialize)]
pub struct DronePlanQuery {
    pub max_distance: Option<i64>,
}

/// Estate ids are UUID v4 strings.
fn parse_estate_id(id: &str) -> Result<String, ApiError> {
    match Uuid::parse_str(id) {
        Ok(uuid) if uuid.get_version_num() == 4 => Ok(uuid.to_string()),
        _ => Err(ValidationError::InvalidId(id.to_string()).into()),
    }
}

async fn load_estate(state: &AppState, id: &str) -> Result<Estate, ApiError> {
    let id = parse_estate_id(id)?;
    state.get_estate(&id).await?.ok_or(ApiError::EstateNotFound)
}

/// Create a new estate.
pub async fn create_estate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let bounds = state.rules().validate_dimensions(req.length, req.width)?;

    let estate = state.create_estate(bounds).await?;
    tracing::info!(
        "Created estate {} ({}x{})",
        estate.id,
        estate.length,
        estate.width
    );

    Ok(Json(CreatedResponse { id: estate.id }))
}

/// Plant a tree on an estate plot.
pub async fn create_tree(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateTreeRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    parse_estate_id(&id)?;
    let (cell, height) = state.rules().validate_tree_fields(req.x, req.y, req.height)?;

    let estate = load_estate(&state, &id).await?;
    validate_placement(estate.bounds(), cell)?;

    match state.plant_tree(&estate, cell, height).await? {
        PlantTreeOutcome::Planted(tree) => {
            tracing::debug!(
                "Planted tree {} at ({}, {}) on estate {}",
                tree.id,
                tree.x,
                tree.y,
                estate.id
            );
            Ok(Json(CreatedResponse { id: tree.id }))
        }
        PlantTreeOutcome::PlotTaken => Err(ApiError::PlotTaken),
    }
}

/// Tree height statistics for an estate.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StatsResult>, ApiError> {
    let estate = load_estate(&state, &id).await?;
    Ok(Json(state.estate_stats(&estate).await?))
}

/// Drone monitoring distance for an estate, optionally capped.
pub async fn get_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<DronePlanQuery>, QueryRejection>,
) -> Result<Json<DronePlanResponse>, ApiError> {
    parse_estate_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let max_distance = validate_max_distance(query.max_distance)?;

    let estate = load_estate(&state, &id).await?;
    let plan = state.drone_plan(&estate, max_distance).await?;
    tracing::debug!(
        "Drone plan for estate {}: distance {} ending at ({}, {})",
        estate.id,
        plan.distance,
        plan.last_cell.x,
        plan.last_cell.y
    );

    Ok(Json(plan.into()))
}

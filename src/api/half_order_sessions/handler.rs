//! Half-order session handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::models::HalfOrderSession;
use crate::db::repository::parse_record_id;
use crate::utils::AppResult;

/// GET /api/half-order-sessions/restaurant/{restaurant_id} - open offers,
/// newest first
pub async fn list_active_by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<HalfOrderSession>>> {
    let rid = parse_record_id("restaurant", &restaurant_id)?;
    let sessions = state.matching_engine().list_active_sessions(&rid).await?;
    Ok(Json(sessions))
}

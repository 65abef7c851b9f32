//! Dining table API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate};
use crate::db::repository::{parse_record_id, DiningTableRepository};
use crate::utils::{AppError, AppResult};

/// POST /api/tables - create a table and mint its QR link (staff)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    user.require_staff()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let frontend = state.config.frontend_url.clone();
    let restaurant_id = payload.restaurant_id.clone();

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .create(payload, |table_id| {
            format!("{frontend}/menu/{restaurant_id}/{table_id}")
        })
        .await?;

    tracing::info!(table = %table.table_number, "dining table created");
    Ok(Json(table))
}

/// GET /api/tables/restaurant/{restaurant_id} - all tables of a restaurant
pub async fn list_by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let rid = parse_record_id("restaurant", &restaurant_id)?;
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_by_restaurant(&rid).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id} - resolved by the customer after scanning the QR
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let tid = parse_record_id("dining_table", &id)?;
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&tid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}

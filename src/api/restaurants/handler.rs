//! Restaurant API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Restaurant, RestaurantCreate};
use crate::db::repository::{parse_record_id, RestaurantRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/restaurants - list all restaurants (public, customer landing)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all().await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let rid = parse_record_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&rid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants - onboard a restaurant (super admin only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    user.require_super_admin()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo.create(payload).await?;

    tracing::info!(name = %restaurant.name, "restaurant created");
    Ok(Json(restaurant))
}

/// DELETE /api/restaurants/{id} - super admin only
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_super_admin()?;

    let rid = parse_record_id("restaurant", &id)?;
    let repo = RestaurantRepository::new(state.db.clone());
    let deleted = repo.delete(&rid).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Restaurant {id} not found")));
    }
    Ok(Json(true))
}

//! Menu item API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::{parse_record_id, MenuItemRepository};
use crate::utils::{AppError, AppResult};

/// POST /api/menu-items - add a dish to the menu (staff)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    user.require_staff()?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(Json(item))
}

/// GET /api/menu-items/restaurant/{restaurant_id} - the customer-facing menu
pub async fn list_by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let rid = parse_record_id("restaurant", &restaurant_id)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_by_restaurant(&rid).await?;
    Ok(Json(items))
}

/// PATCH /api/menu-items/{id} - partial update (staff). Changing
/// `half_price` re-prices future half-order joins immediately.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    user.require_staff()?;

    let mid = parse_record_id("menu_item", &id)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&mid, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - staff
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    user.require_staff()?;

    let mid = parse_record_id("menu_item", &id)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let deleted = repo.delete(&mid).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }
    Ok(Json(true))
}

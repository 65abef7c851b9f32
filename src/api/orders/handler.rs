//! Order API handlers
//!
//! Creation and joining are the customer-facing entry points into the
//! matching engine; listings and status updates serve the counter screen.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{JoinHalfOrder, Order, OrderCreate, OrderStatus};
use crate::db::repository::{parse_record_id, OrderRepository};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
pub struct JoinHalfResponse {
    pub message: &'static str,
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// POST /api/orders - place an order; half-portion lines each open a
/// matching session.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state.order_service().create_order(payload).await?;
    Ok(Json(order))
}

/// POST /api/orders/join-half - join an open half-order session from
/// another table.
pub async fn join_half(
    State(state): State<ServerState>,
    Json(payload): Json<JoinHalfOrder>,
) -> AppResult<Json<JoinHalfResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let order = state.matching_engine().join_session(payload).await?;
    let order_id = order
        .id
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("order came back without an id"))?;

    Ok(Json(JoinHalfResponse {
        message: "Successfully joined half order",
        order_id,
    }))
}

/// GET /api/orders/restaurant/{restaurant_id} - counter screen listing,
/// newest first
pub async fn list_by_restaurant(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let rid = parse_record_id("restaurant", &restaurant_id)?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_restaurant(&rid).await?;
    Ok(Json(orders))
}

/// GET /api/orders/customer/{mobile}/{restaurant_id} - a customer's own
/// order history at one restaurant
pub async fn list_by_customer(
    State(state): State<ServerState>,
    Path((mobile, restaurant_id)): Path<(String, String)>,
) -> AppResult<Json<Vec<Order>>> {
    let rid = parse_record_id("restaurant", &restaurant_id)?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_customer(&mobile, &rid).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let oid = parse_record_id("order", &id)?;
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&oid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// PATCH /api/orders/{id}/status - staff drive the kitchen lifecycle
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    user.require_staff()?;

    let oid = parse_record_id("order", &id)?;
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .update_status(&oid, payload.status, Utc::now())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

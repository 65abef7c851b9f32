//! Analytics handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{parse_record_id, OrderRepository, SessionRepository};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct RestaurantSummary {
    pub total_orders: i64,
    /// Orders still moving through the kitchen (OPEN, MATCHED, PREPARING)
    pub active_orders: i64,
    /// Revenue over SERVED orders
    pub total_revenue: f64,
    pub active_half_order_sessions: i64,
}

/// GET /api/analytics/restaurant/{restaurant_id} - counter dashboard
/// numbers (staff)
pub async fn restaurant_summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(restaurant_id): Path<String>,
) -> AppResult<Json<RestaurantSummary>> {
    user.require_staff()?;

    let rid = parse_record_id("restaurant", &restaurant_id)?;

    // Sweep first so the session count reflects real offers
    state.matching_engine().sweep_expired(&rid).await?;

    let orders = OrderRepository::new(state.db.clone());
    let sessions = SessionRepository::new(state.db.clone());

    Ok(Json(RestaurantSummary {
        total_orders: orders.count_by_restaurant(&rid).await?,
        active_orders: orders.count_active(&rid).await?,
        total_revenue: orders.revenue_served(&rid).await?,
        active_half_order_sessions: sessions.count_active(&rid).await?,
    }))
}

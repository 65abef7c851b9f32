//! Order repository
//!
//! Status transitions driven by the matching engine are conditional
//! updates: the `WHERE status = ...` clause makes them safe to run
//! concurrently with staff updates and repeated sweeps.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};

const TABLE: &str = "order";

#[derive(Debug, Deserialize)]
struct CountRow {
    n: i64,
}

#[derive(Debug, Deserialize)]
struct RevenueRow {
    revenue: f64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self
            .base
            .db()
            .create(fresh_record_id(TABLE))
            .content(order)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    pub async fn find_by_restaurant(&self, restaurant_id: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE restaurant_id = $rid ORDER BY created_at DESC")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_customer(
        &self,
        customer_mobile: &str,
        restaurant_id: &RecordId,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order \
                 WHERE customer_mobile = $mobile AND restaurant_id = $rid \
                 ORDER BY created_at DESC",
            )
            .bind(("mobile", customer_mobile.to_string()))
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Unconditional status update (staff path).
    pub async fn update_status(
        &self,
        id: &RecordId,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Order>> {
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("status", status))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Record a successful match on the originating order.
    pub async fn mark_matched(
        &self,
        id: &RecordId,
        matched_order_id: &RecordId,
        matched_table_number: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Order>> {
        let updated: Vec<Order> = self
            .base
            .db()
            .query(
                "UPDATE $thing SET \
                   status = $status, \
                   matched_order_id = $matched_order_id, \
                   matched_table_number = $matched_table_number, \
                   updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("status", OrderStatus::Matched))
            .bind(("matched_order_id", matched_order_id.to_string()))
            .bind(("matched_table_number", matched_table_number.to_string()))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Expire an order only if it is still OPEN. A MATCHED order is never
    /// touched, which keeps late sweeps harmless.
    pub async fn expire_if_open(
        &self,
        id: &RecordId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Order>> {
        let updated: Vec<Order> = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = $expired, updated_at = $now \
                 WHERE status = $open RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("expired", OrderStatus::Expired))
            .bind(("open", OrderStatus::Open))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Append a freshly opened session to the order's session list.
    pub async fn append_session(
        &self,
        id: &RecordId,
        session_id: &RecordId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Order>> {
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $thing SET session_ids += $sid, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("sid", session_id.to_string()))
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    pub async fn count_by_restaurant(&self, restaurant_id: &RecordId) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS n FROM order WHERE restaurant_id = $rid GROUP ALL")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.n).unwrap_or(0))
    }

    /// Orders still moving through the kitchen (OPEN, MATCHED, PREPARING).
    pub async fn count_active(&self, restaurant_id: &RecordId) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS n FROM order \
                 WHERE restaurant_id = $rid AND status IN $statuses GROUP ALL",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind((
                "statuses",
                vec![
                    OrderStatus::Open,
                    OrderStatus::Matched,
                    OrderStatus::Preparing,
                ],
            ))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.n).unwrap_or(0))
    }

    /// Total revenue over SERVED orders.
    pub async fn revenue_served(&self, restaurant_id: &RecordId) -> RepoResult<f64> {
        let rows: Vec<RevenueRow> = self
            .base
            .db()
            .query(
                "SELECT math::sum(total_amount) AS revenue FROM order \
                 WHERE restaurant_id = $rid AND status = $served GROUP ALL",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("served", OrderStatus::Served))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.revenue).unwrap_or(0.0))
    }
}

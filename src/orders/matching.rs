//! Half-order matching engine
//!
//! Owns the session lifecycle: opening a session when a half portion is
//! ordered, joining a session from another table, and expiring stale
//! sessions. There is no scheduler; expiry is evaluated lazily on the join
//! and list paths.
//!
//! Concurrency model: handlers run concurrently with no in-process
//! coordination, so every transition out of ACTIVE is a conditional write
//! at the storage layer. Two simultaneous joins both read ACTIVE, but only
//! one claim succeeds; the loser sees the failed condition and reports
//! `SessionNotActive` without ever creating an order.

use chrono::{Duration, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::db::models::{
    HalfOrderSession, JoinHalfOrder, Order, OrderLine, OrderStatus, Portion, SessionStatus,
};
use crate::db::repository::{
    MenuItemRepository, OrderRepository, RepoError, SessionRepository,
};
use crate::utils::AppError;

/// Failures of the matching lifecycle, each surfaced distinctly to the
/// caller. Storage faults pass through unchanged via `Repo`.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Session not active")]
    SessionNotActive,

    #[error("Original order not found: {0}")]
    OrderNotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Menu item '{0}' has no half portion price")]
    ItemUnavailable(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::SessionNotFound(msg) => AppError::NotFound(msg),
            MatchError::SessionExpired => AppError::SessionExpired("Session expired".to_string()),
            MatchError::SessionNotActive => {
                AppError::SessionNotActive("Session not active".to_string())
            }
            MatchError::OrderNotFound(msg) | MatchError::MenuItemNotFound(msg) => {
                AppError::NotFound(msg)
            }
            MatchError::ItemUnavailable(name) => {
                AppError::ItemUnavailable(format!("'{name}' cannot be ordered as a half portion"))
            }
            MatchError::Validation(msg) => AppError::Validation(msg),
            MatchError::Repo(e) => e.into(),
        }
    }
}

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Clone)]
pub struct MatchingEngine {
    sessions: SessionRepository,
    orders: OrderRepository,
    menu_items: MenuItemRepository,
    /// How long a session stays joinable after opening
    window: Duration,
}

impl MatchingEngine {
    pub fn new(db: Surreal<Db>, window: Duration) -> Self {
        Self {
            sessions: SessionRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db),
            window,
        }
    }

    /// Open a matching session for one half-portion line of `order`.
    ///
    /// The session copies the menu item, table and customer identity so
    /// polling clients can render the offer standalone, and the order's
    /// session list is stamped with the new id. Order status is left
    /// untouched.
    pub async fn open_session(
        &self,
        order: &Order,
        line: &OrderLine,
    ) -> MatchResult<HalfOrderSession> {
        debug_assert_eq!(line.portion, Portion::Half);

        let order_id = order
            .id
            .clone()
            .ok_or_else(|| MatchError::Validation("order has not been persisted".to_string()))?;

        let now = Utc::now();
        let session = HalfOrderSession {
            id: None,
            restaurant_id: order.restaurant_id.clone(),
            menu_item_id: line.menu_item_id.clone(),
            menu_item_name: line.name.clone(),
            table_id: order.table_id.clone(),
            table_number: order.table_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_mobile: order.customer_mobile.clone(),
            order_id: order_id.clone(),
            created_at: now,
            expires_at: now + self.window,
            status: SessionStatus::Active,
        };

        let session = self.sessions.create(session).await?;
        let session_id = session
            .id
            .clone()
            .ok_or_else(|| MatchError::Validation("session came back without an id".to_string()))?;

        self.orders
            .append_session(&order_id, &session_id, now)
            .await?;

        tracing::info!(
            session = %session_id,
            order = %order_id,
            item = %session.menu_item_name,
            "half-order session opened"
        );
        Ok(session)
    }

    /// Join an open session from another table.
    ///
    /// Creates the joining customer's order with a single half line priced
    /// at the menu item's *current* half price (deliberately not the price
    /// recorded on the original order), links both orders to each other and
    /// marks the session MATCHED.
    pub async fn join_session(&self, req: JoinHalfOrder) -> MatchResult<Order> {
        let session = self
            .sessions
            .find_by_id(&req.session_id)
            .await?
            .ok_or_else(|| MatchError::SessionNotFound(format!("Session {}", req.session_id)))?;

        let now = Utc::now();
        if now > session.expires_at {
            // Opportunistic lazy expiry; conditional so a concurrent claim wins
            self.sessions.expire_if_active(&req.session_id).await?;
            return Err(MatchError::SessionExpired);
        }

        if session.status != SessionStatus::Active {
            return Err(MatchError::SessionNotActive);
        }

        // Defensive: the lifecycle invariant guarantees this order exists
        self.orders
            .find_by_id(&session.order_id)
            .await?
            .ok_or_else(|| MatchError::OrderNotFound(format!("Order {}", session.order_id)))?;

        let menu_item = self
            .menu_items
            .find_by_id(&session.menu_item_id)
            .await?
            .ok_or_else(|| {
                MatchError::MenuItemNotFound(format!("Menu item {}", session.menu_item_id))
            })?;
        let half_price = menu_item
            .half_price
            .ok_or_else(|| MatchError::ItemUnavailable(menu_item.name.clone()))?;

        // The one mandatory concurrency guard: claim the session with a
        // conditional write. An empty result means another joiner won.
        let claimed = self.sessions.claim_for_match(&req.session_id).await?;
        if claimed.is_none() {
            return Err(MatchError::SessionNotActive);
        }

        let new_order = Order {
            id: None,
            restaurant_id: session.restaurant_id.clone(),
            table_id: req.table_id,
            table_number: req.table_number.clone(),
            customer_name: req.customer_name,
            customer_mobile: req.customer_mobile,
            items: vec![OrderLine {
                menu_item_id: session.menu_item_id.clone(),
                name: session.menu_item_name.clone(),
                portion: Portion::Half,
                price: half_price,
                session_id: Some(req.session_id.clone()),
            }],
            total_amount: half_price,
            status: OrderStatus::Matched,
            is_half_order: true,
            session_ids: vec![req.session_id.clone()],
            matched_order_id: Some(session.order_id.clone()),
            matched_table_number: Some(session.table_number.clone()),
            created_at: now,
            updated_at: now,
        };
        let new_order = self.orders.create(new_order).await?;
        let new_order_id = new_order
            .id
            .clone()
            .ok_or_else(|| MatchError::Validation("order came back without an id".to_string()))?;

        self.orders
            .mark_matched(&session.order_id, &new_order_id, &req.table_number, now)
            .await?;

        tracing::info!(
            session = %req.session_id,
            original_order = %session.order_id,
            joining_order = %new_order_id,
            "half-order matched"
        );
        Ok(new_order)
    }

    /// Expire every stale ACTIVE session of the restaurant and cascade to
    /// orders that are still waiting. Returns the ids of sessions expired
    /// by this sweep.
    ///
    /// Idempotent: expiry is conditional on `status = ACTIVE` and the order
    /// cascade on `status = OPEN`, so a second run finds nothing to do and
    /// a session that flipped to MATCHED mid-sweep is never expired.
    pub async fn sweep_expired(&self, restaurant_id: &RecordId) -> MatchResult<Vec<RecordId>> {
        let now = Utc::now();

        let mut swept = Vec::new();
        for session in self.sessions.list_active(restaurant_id).await? {
            if now <= session.expires_at {
                continue;
            }
            if let Some(id) = &session.id {
                if self.sessions.expire_if_active(id).await?.is_some() {
                    swept.push(id.clone());
                }
            }
        }

        // Cascade over every expired session (including ones expired
        // lazily at join time): an originating order still OPEN follows
        // its session into EXPIRED.
        for session in self.sessions.list_expired(restaurant_id).await? {
            self.orders.expire_if_open(&session.order_id, now).await?;
        }

        if !swept.is_empty() {
            tracing::info!(
                restaurant = %restaurant_id,
                count = swept.len(),
                "expired stale half-order sessions"
            );
        }
        Ok(swept)
    }

    /// The staff polling read: sweep first, then list what is still open,
    /// newest first.
    pub async fn list_active_sessions(
        &self,
        restaurant_id: &RecordId,
    ) -> MatchResult<Vec<HalfOrderSession>> {
        self.sweep_expired(restaurant_id).await?;
        Ok(self.sessions.list_active(restaurant_id).await?)
    }
}

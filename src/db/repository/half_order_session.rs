//! Half-order session repository
//!
//! The status transitions here are the concurrency-critical part of the
//! whole system: claiming a session for a join and expiring it are both
//! compare-and-swap updates conditioned on `status = ACTIVE`, so exactly
//! one writer can move a session out of ACTIVE.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{HalfOrderSession, SessionStatus};

const TABLE: &str = "half_order_session";

#[derive(Debug, serde::Deserialize)]
struct CountRow {
    n: i64,
}

#[derive(Clone)]
pub struct SessionRepository {
    base: BaseRepository,
}

impl SessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, session: HalfOrderSession) -> RepoResult<HalfOrderSession> {
        let created: Option<HalfOrderSession> = self
            .base
            .db()
            .create(fresh_record_id(TABLE))
            .content(session)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create session".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<HalfOrderSession>> {
        let session: Option<HalfOrderSession> = self.base.db().select(id.clone()).await?;
        Ok(session)
    }

    /// All sessions currently offering a match, newest first.
    pub async fn list_active(&self, restaurant_id: &RecordId) -> RepoResult<Vec<HalfOrderSession>> {
        let sessions: Vec<HalfOrderSession> = self
            .base
            .db()
            .query(
                "SELECT * FROM half_order_session \
                 WHERE restaurant_id = $rid AND status = $active \
                 ORDER BY created_at DESC",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("active", SessionStatus::Active))
            .await?
            .take(0)?;
        Ok(sessions)
    }

    /// Sessions that have left ACTIVE through expiry (used for the order
    /// cascade on the sweep path).
    pub async fn list_expired(&self, restaurant_id: &RecordId) -> RepoResult<Vec<HalfOrderSession>> {
        let sessions: Vec<HalfOrderSession> = self
            .base
            .db()
            .query(
                "SELECT * FROM half_order_session \
                 WHERE restaurant_id = $rid AND status = $expired",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("expired", SessionStatus::Expired))
            .await?
            .take(0)?;
        Ok(sessions)
    }

    /// Claim an ACTIVE session for a join: conditional write, returns
    /// `None` when another writer moved the session out of ACTIVE first.
    pub async fn claim_for_match(&self, id: &RecordId) -> RepoResult<Option<HalfOrderSession>> {
        self.transition_from_active(id, SessionStatus::Matched).await
    }

    /// Lazily expire an ACTIVE session. Same CAS discipline as
    /// [`claim_for_match`](Self::claim_for_match); a session that was just
    /// matched is left alone.
    pub async fn expire_if_active(&self, id: &RecordId) -> RepoResult<Option<HalfOrderSession>> {
        self.transition_from_active(id, SessionStatus::Expired).await
    }

    async fn transition_from_active(
        &self,
        id: &RecordId,
        to: SessionStatus,
    ) -> RepoResult<Option<HalfOrderSession>> {
        let updated: Vec<HalfOrderSession> = self
            .base
            .db()
            .query("UPDATE $thing SET status = $to WHERE status = $active RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("to", to))
            .bind(("active", SessionStatus::Active))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }

    pub async fn count_active(&self, restaurant_id: &RecordId) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query(
                "SELECT count() AS n FROM half_order_session \
                 WHERE restaurant_id = $rid AND status = $active GROUP ALL",
            )
            .bind(("rid", restaurant_id.to_string()))
            .bind(("active", SessionStatus::Active))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.n).unwrap_or(0))
    }
}

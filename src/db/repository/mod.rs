//! Repository module
//!
//! One repository struct per SurrealDB table, all sharing a cloned
//! database handle through [`BaseRepository`]. Reference fields are stored
//! as `"table:key"` strings, so filter queries always bind the string form
//! of a record id; record-level operations (select/create/update/delete)
//! bind the native `RecordId`.

pub mod dining_table;
pub mod half_order_session;
pub mod menu_item;
pub mod order;
pub mod restaurant;
pub mod user;

pub use dining_table::DiningTableRepository;
pub use half_order_session::SessionRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::utils::AppError::NotFound(msg),
            RepoError::Duplicate(msg) => crate::utils::AppError::Conflict(msg),
            RepoError::Validation(msg) => crate::utils::AppError::Validation(msg),
            RepoError::Database(msg) => crate::utils::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Mint a fresh record id with a UUIDv4 key.
///
/// The simple (hyphen-free) format keeps the key plain-alphanumeric so the
/// `"table:key"` string form round-trips without bracket escaping.
pub fn fresh_record_id(table: &str) -> RecordId {
    RecordId::from_table_key(table, uuid::Uuid::new_v4().simple().to_string())
}

/// Parse a client-supplied `"table:key"` id, expecting a specific table.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    let rid: RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {id}")))?;
    if rid.table() != table {
        return Err(RepoError::Validation(format!(
            "Expected a {table} id, got: {id}"
        )));
    }
    Ok(rid)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

//! Database module
//!
//! Owns the embedded SurrealDB connection. Production uses the RocksDB
//! backend under the work directory; tests run against the in-memory
//! engine through [`DbService::memory`].

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "qrdine";
const DATABASE: &str = "main";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `dir`.
    pub async fn open(dir: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database connection established ({})", dir.display());
        Ok(Self { db })
    }

    /// In-memory database for tests.
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn on_disk_database_survives_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database");

        {
            let service = DbService::open(&path).await.unwrap();
            let _: Option<serde_json::Value> = service
                .db
                .create(("probe", "one"))
                .content(serde_json::json!({ "ok": true }))
                .await
                .unwrap();
        }

        let service = DbService::open(&path).await.unwrap();
        let probe: Option<serde_json::Value> = service.db.select(("probe", "one")).await.unwrap();
        assert!(probe.is_some());
    }
}

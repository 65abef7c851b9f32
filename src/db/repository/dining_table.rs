//! Dining table repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_restaurant(&self, restaurant_id: &RecordId) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE restaurant_id = $rid ORDER BY table_number")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> = self.base.db().select(id.clone()).await?;
        Ok(table)
    }

    /// Create a table. The QR URL is composed by the caller from the
    /// configured frontend base URL and the freshly minted table id.
    pub async fn create(
        &self,
        data: DiningTableCreate,
        qr_url_for: impl FnOnce(&RecordId) -> String,
    ) -> RepoResult<DiningTable> {
        let id = fresh_record_id(TABLE);
        let table = DiningTable {
            id: None,
            restaurant_id: data.restaurant_id,
            table_number: data.table_number,
            qr_url: qr_url_for(&id),
            is_active: true,
            created_at: Utc::now(),
        };

        let created: Option<DiningTable> = self.base.db().create(id).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }
}

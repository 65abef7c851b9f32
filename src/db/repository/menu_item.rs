//! Menu item repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_restaurant(&self, restaurant_id: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE restaurant_id = $rid ORDER BY category, name")
            .bind(("rid", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: None,
            restaurant_id: data.restaurant_id,
            name: data.name,
            category: data.category,
            full_price: data.full_price,
            half_price: data.half_price,
            description: data.description,
            is_available: data.is_available,
            created_at: Utc::now(),
        };

        let created: Option<MenuItem> = self
            .base
            .db()
            .create(fresh_record_id(TABLE))
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Patch only the provided fields.
    pub async fn update(&self, id: &RecordId, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        if data.is_empty() {
            return Err(RepoError::Validation("No fields to update".to_string()));
        }

        let updated: Option<MenuItem> = self.base.db().update(id.clone()).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
    }

    /// Hard delete; returns false if the record did not exist.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Vec<MenuItem> = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", id.clone()))
            .await?
            .take(0)?;
        Ok(!deleted.is_empty())
    }
}

//! Restaurant repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Restaurant, RestaurantCreate};

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Restaurant>> {
        let restaurant: Option<Restaurant> = self.base.db().select(id.clone()).await?;
        Ok(restaurant)
    }

    pub async fn create(&self, data: RestaurantCreate) -> RepoResult<Restaurant> {
        let restaurant = Restaurant {
            id: None,
            name: data.name,
            address: data.address,
            phone: data.phone,
            kind: data.kind,
            created_at: Utc::now(),
        };

        let created: Option<Restaurant> = self
            .base
            .db()
            .create(fresh_record_id(TABLE))
            .content(restaurant)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Hard delete; returns false if the record did not exist.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Vec<Restaurant> = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", id.clone()))
            .await?
            .take(0)?;
        Ok(!deleted.is_empty())
    }
}

//! Staff user repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{fresh_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a staff user with a pre-hashed password.
    pub async fn create(&self, data: UserCreate, password_hash: String) -> RepoResult<User> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let user = User {
            id: None,
            username: data.username,
            password_hash,
            role: data.role,
            restaurant_id: data.restaurant_id,
            created_at: Utc::now(),
        };

        let created: Option<User> = self
            .base
            .db()
            .create(fresh_record_id(TABLE))
            .content(user)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}

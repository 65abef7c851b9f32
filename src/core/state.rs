//! Server state
//!
//! [`ServerState`] holds the shared handles every request handler needs:
//! the immutable configuration, the embedded database connection and the
//! JWT service. Cloning is shallow (the database handle and JWT service
//! are reference-counted).

use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::{MatchingEngine, OrderService};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt: Arc<JwtService>) -> Self {
        Self { config, db, jwt }
    }

    /// Open the database under the configured work directory and build the
    /// full state. The connection lives for the process lifetime and is torn
    /// down when the last handle drops.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_service = DbService::open(&config.database_dir()).await?;
        let jwt = Arc::new(JwtService::new(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt))
    }

    /// Matching engine bound to this state's database handle and the
    /// configured expiry window.
    pub fn matching_engine(&self) -> MatchingEngine {
        MatchingEngine::new(self.db.clone(), self.config.half_order_window())
    }

    /// Order service delegating half-portion lines to the matching engine.
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.matching_engine())
    }
}

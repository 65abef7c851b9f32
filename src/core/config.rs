//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `WORK_DIR` | `./data` | Work directory (database, logs) |
//! | `HTTP_PORT` | `8000` | HTTP API port |
//! | `FRONTEND_URL` | `http://localhost:3000` | Base URL baked into table QR codes |
//! | `HALF_ORDER_WINDOW_MINUTES` | `30` | Half-order matching window |
//! | `ENVIRONMENT` | `development` | development / staging / production |
//! | `JWT_SECRET` and friends | see [`JwtConfig`] | Token signing |

use std::path::{Path, PathBuf};

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Frontend base URL used when generating per-table QR links
    pub frontend_url: String,
    /// How long an open half-order session stays joinable
    pub half_order_window_minutes: i64,
    /// JWT signing configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            half_order_window_minutes: std::env::var("HALF_ORDER_WINDOW_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            jwt: JwtConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Matching window as a [`chrono::Duration`].
    pub fn half_order_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.half_order_window_minutes)
    }

    pub fn database_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if it does not exist yet.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables and
 * opens the credential store it names.
 *
 * # Variables
 *
 * | Variable | Required | Default |
 * |---|---|---|
 * | `JWT_SECRET` | yes | - |
 * | `DATABASE_URL` | no | in-memory store |
 * | `SERVER_PORT` | no | `4000` |
 * | `BCRYPT_COST` | no | `10` |
 *
 * # Error Handling
 *
 * A missing signing secret is fatal: the server cannot issue or verify
 * tokens without it. A configured database that cannot be reached or
 * migrated is fatal too. Only an absent `DATABASE_URL` falls back, to the
 * in-memory store.
 */

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::store::{MemoryStore, PgStore, Store, StoreError};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Configuration errors, all fatal at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Token signing secret
    pub jwt_secret: String,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub port: u16,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl ServerConfig {
    /// Configuration with defaults and the given secret, using the in-memory store
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            database_url: None,
            port: DEFAULT_PORT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let jwt_secret = present("JWT_SECRET").ok_or(ConfigError::MissingSecret)?;

        let port = match present("SERVER_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let bcrypt_cost = match present("BCRYPT_COST") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or(ConfigError::Invalid {
                    name: "BCRYPT_COST",
                    value,
                })?,
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            jwt_secret,
            database_url: present("DATABASE_URL"),
            port,
            bcrypt_cost,
        })
    }
}

/// Open the configured store
///
/// With `DATABASE_URL` set this connects to PostgreSQL and runs
/// migrations; otherwise an empty in-memory store is returned.
pub async fn load_store(config: &ServerConfig) -> Result<Arc<dyn Store>, StoreError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Using in-memory store; data will not persist.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let store = PgStore::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    store.migrate().await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(store))
}

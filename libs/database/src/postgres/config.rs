use std::time::Duration;

use sea_orm::ConnectOptions;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// PostgreSQL connection configuration
///
/// Holds the connection URL plus the pool settings used by every campus
/// service that talks to the relational store.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// PostgreSQL connection URL (required)
    pub url: String,

    /// Maximum pool connections
    pub max_connections: u32,

    /// Minimum pool connections kept warm
    pub min_connections: u32,

    /// Connect/acquire timeout in seconds
    pub timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 50,
            min_connections: 2,
            timeout_secs: 8,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Build the SeaORM connect options for this configuration
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.timeout_secs))
            .acquire_timeout(Duration::from_secs(self.timeout_secs))
            .sqlx_logging(true);
        opt
    }
}

/// Load PostgresConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (required) - PostgreSQL connection string
/// - `DATABASE_MAX_CONNECTIONS` (optional) - pool upper bound
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = core_config::env_required("DATABASE_URL")?;

        let mut config = Self::new(url);
        if let Ok(max) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max.parse().map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;
        }

        Ok(config)
    }
}

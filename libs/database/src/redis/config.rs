#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// Default Redis address used when nothing is configured
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Redis connection configuration
///
/// Holds the connection URL for the queue's backing store. Falls back to
/// [`DEFAULT_REDIS_URL`] when nothing is configured.
#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

/// Load RedisConfig from environment variables
///
/// Environment variables:
/// - `REDIS_URL` or `REDIS_HOST` (optional) - connection string; the
///   default address is used when neither is set
#[cfg(feature = "config")]
impl FromEnv for RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_HOST"))
            .unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        Ok(Self { url })
    }
}

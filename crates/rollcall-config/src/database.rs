//! PostgreSQL pool configuration.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECS`: how long a read waits for a pooled
//!   connection before failing (default: 5)

use std::fmt;
use std::time::Duration;

use crate::env_or;

/// A required environment variable was not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVar(pub &'static str);

impl fmt::Display for MissingVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be set", self.0)
    }
}

impl std::error::Error for MissingVar {}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_env() -> Result<Self, MissingVar> {
        let url = std::env::var("DATABASE_URL").map_err(|_| MissingVar("DATABASE_URL"))?;
        let defaults = Self::new(url);
        Ok(Self {
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            acquire_timeout: Duration::from_secs(env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)),
            ..defaults
        })
    }
}

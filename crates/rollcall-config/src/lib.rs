//! # Rollcall Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: credential signing and verification settings
//! - [`database`]: PostgreSQL pool settings
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::{DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let db_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, MissingVar};
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

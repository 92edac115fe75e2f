//! # Rollcall DB
//!
//! PostgreSQL access for the Rollcall API.
//!
//! - [`init_db_pool`] builds the pool from [`DatabaseConfig`]
//! - [`run_migrations`] applies the embedded schema
//! - [`PgAccessRepository`] implements the access and resource store traits
//! - [`scope`] compiles a [`rollcall_access::Predicate`] into SQL
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::DatabaseConfig;
//! use rollcall_db::{PgAccessRepository, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let repo = PgAccessRepository::new(pool.clone());
//! ```

pub mod repository;
pub mod schema;
pub mod scope;

use rollcall_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use repository::PgAccessRepository;
pub use sqlx::PgPool;

/// Creates the connection pool. Called once at startup; the pool is cloned
/// into application state and closed on shutdown.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

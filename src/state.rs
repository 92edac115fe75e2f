use std::sync::Arc;

use rollcall_access::{AccessEngine, InMemoryStore, ResourceStore};
use rollcall_config::{CorsConfig, JwtConfig};
use rollcall_db::{PgAccessRepository, PgPool};

#[derive(Clone)]
pub struct AppState {
    pub engine: AccessEngine,
    pub store: Arc<dyn ResourceStore>,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// State backed by PostgreSQL. The same repository serves relation
    /// lookups and scoped listings.
    pub fn from_pool(pool: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        let repo = Arc::new(PgAccessRepository::new(pool));
        Self {
            engine: AccessEngine::new(jwt_config, repo.clone()),
            store: repo,
            cors_config,
        }
    }

    /// State backed by an in-memory store, for tests and local runs.
    pub fn in_memory(store: Arc<InMemoryStore>, jwt_config: JwtConfig) -> Self {
        Self {
            engine: AccessEngine::new(jwt_config, store.clone()),
            store,
            cors_config: CorsConfig {
                allowed_origins: Vec::new(),
            },
        }
    }
}

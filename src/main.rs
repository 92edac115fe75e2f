use dotenvy::dotenv;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use rollcall_db::{init_db_pool, run_migrations};
use rollcall_observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let state = AppState::from_pool(pool.clone(), JwtConfig::from_env(), CorsConfig::from_env());
    let app = init_router(state, init_metrics());

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.bind_address()).await?;
    tracing::info!(address = %server_config.bind_address(), "Server listening");
    tracing::info!("Scalar UI available at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

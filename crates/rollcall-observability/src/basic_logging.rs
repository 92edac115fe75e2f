use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directives when `RUST_LOG` is unset. `LOG_LEVEL` replaces the
/// level for the rollcall crates only.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(format!(
            "rollcall={},tower_http=warn,sqlx=warn",
            log_level
        ))
    })
}

/// Console-only logging, used when observability is disabled at runtime or
/// compiled out.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(default_filter());

    // A CLI may already have installed a subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

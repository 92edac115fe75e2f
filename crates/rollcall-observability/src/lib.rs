//! Rollcall Observability
//!
//! Logging and metrics for the Rollcall API:
//! - console and optional JSON file logging via `tracing-subscriber`
//! - Prometheus metrics via `metrics-exporter-prometheus`
//! - HTTP request logging and metrics middleware
//!
//! Everything beyond console logging sits behind the `observability` feature
//! (on by default). At runtime, `OBSERVABILITY_ENABLED=false` turns it off.

use std::sync::OnceLock;

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{init_metrics, metrics_app, metrics_middleware};
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once. Enabled unless set to `false` or `0`.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        cfg!(feature = "observability")
            && std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| parse_enabled(&v))
                .unwrap_or(true)
    })
}

fn parse_enabled(value: &str) -> bool {
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

// No-op stand-ins when the feature is compiled out.
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    #[derive(Clone)]
    pub struct PrometheusHandle;

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

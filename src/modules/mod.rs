//! Feature modules. Each has a `controller`, a `model` and a `router`.

pub mod access;
pub mod resources;
pub mod search;

use axum::extract::{Path, rejection::PathRejection};
use rollcall_core::AppError;
use rollcall_models::ResourceKind;

/// Parses a `{kind}` path segment.
pub(crate) fn parse_kind(raw: &str) -> Result<ResourceKind, AppError> {
    raw.parse().map_err(AppError::bad_request)
}

/// Unwraps path parameters, turning a rejection into a JSON 400.
pub(crate) fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    path.map(|Path(value)| value)
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid path parameters: {}", e)))
}

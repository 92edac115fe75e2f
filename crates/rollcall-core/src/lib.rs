//! # Rollcall Core
//!
//! Foundational types shared by the Rollcall HTTP layer:
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion
//! - [`pagination`]: page-based pagination parameters and metadata

pub mod errors;
pub mod pagination;

pub use axum::http::StatusCode;
pub use errors::{AppError, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};

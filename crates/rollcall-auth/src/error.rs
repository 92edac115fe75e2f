//! The authorization error taxonomy.
//!
//! | variant | HTTP | meaning |
//! |---------|------|---------|
//! | `Unauthenticated` | 401 | credential missing, malformed, expired or forged |
//! | `Forbidden` | 403 | role not permitted for the operation |
//! | `IdentityIncomplete` | 403 | valid credential, no backing profile |
//! | `NotFound` | 404 | resource absent *or* outside the caller's scope |
//! | `Store` | 500 | the data store failed |
//!
//! `NotFound` deliberately merges "missing" and "not yours" so a caller cannot
//! probe for IDs that exist in another school.

use rollcall_core::{AppError, StatusCode};
use rollcall_models::{ResourceKind, Role, UserId};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Access denied. Role {role} is not permitted to {operation}")]
    Forbidden { role: Role, operation: &'static str },

    #[error("no {role} profile exists for subject {subject_id}")]
    IdentityIncomplete { subject_id: UserId, role: Role },

    #[error("{0} not found")]
    NotFound(ResourceKind),

    #[error("data store failure")]
    Store(#[source] BoxError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } | AuthError::IdentityIncomplete { .. } => {
                StatusCode::FORBIDDEN
            }
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-friendly label used in logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated(_) => "unauthenticated",
            AuthError::Forbidden { .. } => "forbidden",
            AuthError::IdentityIncomplete { .. } => "identity_incomplete",
            AuthError::NotFound(_) => "not_found",
            AuthError::Store(_) => "store",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        match err {
            // The missing-profile detail is for operators, not for the caller.
            AuthError::IdentityIncomplete { .. } => {
                AppError::forbidden("Access denied".to_string())
            }
            AuthError::Store(source) => AppError::new(status, anyhow::anyhow!(source)),
            other => AppError::new(status, anyhow::anyhow!(other.to_string())),
        }
    }
}

//! Authorization extractors.
//!
//! Each extractor verifies the bearer token, applies the role gate for one
//! operation and resolves the caller's identity, in that order.

use axum::http::{header, request::Parts};
use rollcall_auth::bearer_token;
use rollcall_core::AppError;

/// The bearer token from the `Authorization` header.
pub fn credential(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    Ok(bearer_token(header)?)
}

/// Declares an extractor that authorizes the caller against an
/// [`OperationConfig`](rollcall_access::OperationConfig).
///
/// The role gate runs before identity resolution, so a caller outside the
/// operation is rejected without touching the store.
#[macro_export]
macro_rules! require_roles {
    ($name:ident, $operation:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub rollcall_access::Identity);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = rollcall_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let token = $crate::middleware::auth::credential(parts)?;
                let identity = state.engine.authorize(token, &$operation).await?;
                Ok($name(identity))
            }
        }
    };
}

require_roles!(CanViewIdentity, crate::operations::VIEW_IDENTITY);
require_roles!(RequireParent, crate::operations::VIEW_OWN_SCHOOLS);
require_roles!(CanPreviewFilter, crate::operations::PREVIEW_FILTER);
require_roles!(CanCheckAccess, crate::operations::CHECK_ACCESS);
require_roles!(RequireSuperAdmin, crate::operations::LIST_PARENT_SCHOOLS);
require_roles!(CanViewResources, crate::operations::VIEW_RESOURCES);
require_roles!(CanSearch, crate::operations::SEARCH);

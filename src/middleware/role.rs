//! Route-layer role gates.
//!
//! These run before extractors and handlers and only look at the verified
//! role claim, so a rejected caller never reaches the data store.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rollcall_access::{OperationConfig, check_role};
use rollcall_auth::verify_token;
use rollcall_core::AppError;

use crate::middleware::auth::credential;
use crate::operations::LIST_PARENT_SCHOOLS;
use crate::state::AppState;

/// Rejects the request unless its bearer token is valid and its role is
/// permitted by `operation`.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/parents/{parent_id}/schools", get(parent_schools))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_super_admin));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    operation: &'static OperationConfig,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();

    let claims = verify_token(credential(&parts)?, state.engine.jwt_config())?;
    check_role(claims.role, operation)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, &LIST_PARENT_SCHOOLS).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

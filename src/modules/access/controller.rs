use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use rollcall_core::AppError;
use rollcall_models::{ResourceId, ResourceKind, UserId};

use crate::middleware::auth::{
    CanCheckAccess, CanPreviewFilter, CanViewIdentity, RequireParent, RequireSuperAdmin,
};
use crate::modules::{parse_kind, path_params};
use crate::state::AppState;

use super::model::{FilterResponse, IdentityResponse, SchoolsResponse};

#[utoipa::path(
    get,
    path = "/api/access/me",
    responses(
        (status = 200, description = "Resolved identity of the caller", body = IdentityResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "No profile backs the credential")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_identity(
    CanViewIdentity(identity): CanViewIdentity,
) -> Result<Json<IdentityResponse>, AppError> {
    Ok(Json(IdentityResponse::from(&identity)))
}

#[utoipa::path(
    get,
    path = "/api/access/me/schools",
    responses(
        (status = 200, description = "Schools of the parent's linked children", body = SchoolsResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Parents only")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_own_schools(
    State(state): State<AppState>,
    RequireParent(identity): RequireParent,
) -> Result<Json<SchoolsResponse>, AppError> {
    let schools = state
        .engine
        .resolve_parent_schools(identity.subject_id())
        .await?;
    Ok(Json(SchoolsResponse {
        school_ids: schools.into_iter().collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/access/filters/{kind}",
    params(
        ("kind" = String, Path, description = "Resource kind, singular or plural (e.g. `students`)")
    ),
    responses(
        (status = 200, description = "Scoping predicate applied to the caller's listings", body = FilterResponse),
        (status = 400, description = "Unknown resource kind"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_filter(
    State(state): State<AppState>,
    CanPreviewFilter(identity): CanPreviewFilter,
    Path(kind): Path<String>,
) -> Result<Json<FilterResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let predicate = state.engine.build_filter(&identity, kind);
    Ok(Json(FilterResponse { kind, predicate }))
}

#[utoipa::path(
    get,
    path = "/api/access/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "Resource kind"),
        ("id" = uuid::Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 204, description = "The caller may act on the resource"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resource not found or outside the caller's scope")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn check_access(
    State(state): State<AppState>,
    CanCheckAccess(identity): CanCheckAccess,
    path: Result<Path<(String, ResourceId)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let (kind, id) = path_params(path)?;
    let kind: ResourceKind = parse_kind(&kind)?;
    state.engine.require_access(&identity, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/access/parents/{parent_id}/schools",
    params(
        ("parent_id" = uuid::Uuid, Path, description = "Parent user ID")
    ),
    responses(
        (status = 200, description = "Schools of the parent's linked children", body = SchoolsResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Super admin only")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_parent_schools(
    State(state): State<AppState>,
    RequireSuperAdmin(_identity): RequireSuperAdmin,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<SchoolsResponse>, AppError> {
    let parent_id = path_params(path)?;
    let schools = state.engine.resolve_parent_schools(parent_id).await?;
    Ok(Json(SchoolsResponse {
        school_ids: schools.into_iter().collect(),
    }))
}

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use rollcall_auth::AuthError;
use rollcall_core::{AppError, PaginationParams};
use rollcall_models::{ListQuery, ResourceId, ResourceSummary};

use crate::middleware::auth::CanViewResources;
use crate::modules::{parse_kind, path_params};
use crate::state::AppState;

use super::model::PaginatedResourcesResponse;

#[utoipa::path(
    get,
    path = "/api/resources/{kind}",
    params(
        ("kind" = String, Path, description = "Resource kind, singular or plural"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Resources visible to the caller", body = PaginatedResourcesResponse),
        (status = 400, description = "Unknown resource kind or invalid pagination"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "No profile backs the credential")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn list_resources(
    State(state): State<AppState>,
    CanViewResources(identity): CanViewResources,
    Path(kind): Path<String>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PaginatedResourcesResponse>, AppError> {
    let Query(pagination) = pagination
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let kind = parse_kind(&kind)?;

    let predicate = state.engine.build_filter(&identity, kind);
    let query = ListQuery::page(pagination.limit(), pagination.offset());
    let data = state
        .store
        .list_scoped(kind, &predicate, &query)
        .await
        .map_err(AuthError::from)?;

    let meta = pagination.meta(data.len());
    Ok(Json(PaginatedResourcesResponse { data, meta }))
}

#[utoipa::path(
    get,
    path = "/api/resources/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "Resource kind"),
        ("id" = uuid::Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "The resource", body = ResourceSummary),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Resource not found or outside the caller's scope")
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
pub async fn get_resource(
    State(state): State<AppState>,
    CanViewResources(identity): CanViewResources,
    path: Result<Path<(String, ResourceId)>, PathRejection>,
) -> Result<Json<ResourceSummary>, AppError> {
    let (kind, id) = path_params(path)?;
    let kind = parse_kind(&kind)?;
    state.engine.require_access(&identity, kind, id).await?;

    let resource = state
        .store
        .find(kind, id)
        .await
        .map_err(AuthError::from)?
        .ok_or(AuthError::NotFound(kind))?;

    Ok(Json(resource))
}

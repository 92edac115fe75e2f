use axum::{Json, extract::State};
use rollcall_auth::AuthError;
use rollcall_core::AppError;
use rollcall_models::ListQuery;

use crate::middleware::auth::CanSearch;
use crate::state::AppState;
use crate::validator::ValidatedQuery;

use super::model::{SearchParams, SearchResponse};

/// Searches across tenants the caller can see.
///
/// A parent's schools are resolved from their linked children before any
/// query runs; school claims in the token play no part.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching resources within the caller's scope", body = SearchResponse),
        (status = 400, description = "Unknown or unsearchable kind"),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Invalid search parameters")
    ),
    tag = "Search",
    security(("bearer_auth" = []))
)]
pub async fn search(
    State(state): State<AppState>,
    CanSearch(identity): CanSearch,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let kinds = params.kinds()?;
    let identity = state.engine.scoped_identity(identity).await?;
    let query = ListQuery::page(params.limit(), 0).with_search(params.q.trim());

    let mut results = Vec::new();
    for kind in kinds {
        let predicate = state.engine.build_filter(&identity, kind);
        let rows = state
            .store
            .list_scoped(kind, &predicate, &query)
            .await
            .map_err(AuthError::from)?;
        results.extend(rows);
    }

    tracing::debug!(result_count = results.len(), "Search completed");
    Ok(Json(SearchResponse {
        query: params.q,
        results,
    }))
}

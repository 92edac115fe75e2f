use rollcall_core::PaginationMeta;
use rollcall_models::ResourceSummary;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResourcesResponse {
    pub data: Vec<ResourceSummary>,
    pub meta: PaginationMeta,
}

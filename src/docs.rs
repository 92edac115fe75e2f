use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rollcall_access::Predicate;
use rollcall_core::{ErrorResponse, PaginationMeta};
use rollcall_models::{ResourceKind, ResourceSummary, Role};

use crate::modules::access::model::{FilterResponse, IdentityResponse, SchoolsResponse};
use crate::modules::resources::model::PaginatedResourcesResponse;
use crate::modules::search::model::SearchResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::access::controller::get_identity,
        crate::modules::access::controller::get_own_schools,
        crate::modules::access::controller::get_filter,
        crate::modules::access::controller::check_access,
        crate::modules::access::controller::get_parent_schools,
        crate::modules::resources::controller::list_resources,
        crate::modules::resources::controller::get_resource,
        crate::modules::search::controller::search,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            Role,
            ResourceKind,
            ResourceSummary,
            Predicate,
            IdentityResponse,
            SchoolsResponse,
            FilterResponse,
            PaginatedResourcesResponse,
            SearchResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Access", description = "Identity introspection and access checks"),
        (name = "Resources", description = "Tenant-scoped resource listing and lookup"),
        (name = "Search", description = "Cross-tenant search within the caller's scope")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Authorization and tenant isolation for multi-school education data"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

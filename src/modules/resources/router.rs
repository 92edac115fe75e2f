use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_resource, list_resources};

pub fn init_resources_router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(list_resources))
        .route("/{kind}/{id}", get(get_resource))
}

use axum::{Router, middleware, routing::get};

use crate::middleware::role::require_super_admin;
use crate::state::AppState;

use super::controller::{
    check_access, get_filter, get_identity, get_own_schools, get_parent_schools,
};

pub fn init_access_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/parents/{parent_id}/schools", get(get_parent_schools))
        .route_layer(middleware::from_fn_with_state(state, require_super_admin));

    Router::new()
        .route("/me", get(get_identity))
        .route("/me/schools", get(get_own_schools))
        .route("/filters/{kind}", get(get_filter))
        .route("/{kind}/{id}", get(check_access))
        .merge(admin_routes)
}

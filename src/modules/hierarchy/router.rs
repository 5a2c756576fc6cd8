use axum::{
    Router,
    middleware,
    routing::{get, put},
};

use crate::middleware::role::require_company_admin;
use crate::state::AppState;

use super::controller::{get_legend, update_label};

pub fn init_hierarchy_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/labels",
            put(update_label)
                .route_layer(middleware::from_fn_with_state(state, require_company_admin)),
        )
        .route("/legend", get(get_legend))
}

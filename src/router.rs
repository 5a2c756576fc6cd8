use std::sync::Arc;

use axum::{Router, middleware};
use tower_governor::GovernorLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::companies::router::init_companies_router;
use crate::modules::hierarchy::router::init_hierarchy_router;
use crate::modules::invitations::router::init_invitations_router;
use crate::modules::leads::router::init_leads_router;
use crate::modules::members::router::init_members_router;
use crate::modules::roles::router::init_team_roles_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let auth_governor = Arc::new(state.rate_limit_config.auth_governor_config());

    // The team hierarchy surface lives under one /team prefix: membership,
    // invitations, and role assignment.
    let team = init_members_router()
        .merge(init_invitations_router())
        .merge(init_team_roles_router());

    let api = Router::new()
        .nest(
            "/auth",
            init_auth_router().layer(GovernorLayer {
                config: auth_governor,
            }),
        )
        .nest("/companies", init_companies_router())
        .nest("/team", team)
        .nest("/hierarchy", init_hierarchy_router(state.clone()))
        .nest("/leads", init_leads_router());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(state.cors_config.layer())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
}

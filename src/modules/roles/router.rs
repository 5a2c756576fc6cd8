use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_assignable_roles, promote_member};

/// Role endpoints mounted under `/api/team`.
pub fn init_team_roles_router() -> Router<AppState> {
    Router::new()
        .route("/assignable-roles", get(get_assignable_roles))
        .route("/members/{id}/role", put(promote_member))
}

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::state::AppState;

use super::controller::{change_manager, delete_member, get_members, get_team};

pub fn init_members_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_team))
        .route("/members", get(get_members))
        .route("/members/{id}/manager", put(change_manager))
        .route("/members/{id}", delete(delete_member))
}

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_profile, login_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/profile", get(get_profile))
}

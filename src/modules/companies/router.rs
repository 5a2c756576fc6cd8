use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_my_company, register_company};

pub fn init_companies_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_company))
        .route("/me", get(get_my_company))
}

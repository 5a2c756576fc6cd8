use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{assign_lead, create_lead, get_leads, update_lead_status};

pub fn init_leads_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leads).post(create_lead))
        .route("/{id}/assign", put(assign_lead))
        .route("/{id}/status", put(update_lead_status))
}

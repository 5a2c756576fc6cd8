use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::invite_team_member;

/// Invitation endpoint mounted under `/api/team`.
pub fn init_invitations_router() -> Router<AppState> {
    Router::new().route("/invite", post(invite_team_member))
}

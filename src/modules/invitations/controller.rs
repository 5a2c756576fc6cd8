use axum::{Json, extract::State};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{InviteResponse, InviteTeamMemberDto};
use super::service;

/// Invite a new team member.
///
/// The requester comes from the session token; the payload carries only the
/// new member's details.
#[utoipa::path(
    post,
    path = "/api/team/invite",
    request_body = InviteTeamMemberDto,
    responses(
        (status = 200, description = "Member invited", body = InviteResponse),
        (status = 400, description = "Malformed input or duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requested role not below the requester's level"),
        (status = 500, description = "Partial failure, already rolled back")
    ),
    tag = "Team",
    security(("bearer_auth" = []))
)]
pub async fn invite_team_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<InviteTeamMemberDto>,
) -> Result<Json<InviteResponse>, AppError> {
    let requester_id = auth_user.user_id()?;
    let response =
        service::invite_team_member(&state.db, &state.email_config, requester_id, dto).await?;
    Ok(Json(response))
}

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::hierarchy::tree::{TeamForest, TeamMember};
use crate::state::AppState;
use crate::utils::auth_helpers::resolve_actor;
use crate::utils::errors::AppError;

use super::model::{ChangeManagerDto, MessageResponse};
use super::service;

#[utoipa::path(
    get,
    path = "/api/team",
    responses(
        (status = 200, description = "The viewer's display forest", body = TeamForest),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Team",
    security(("bearer_auth" = []))
)]
pub async fn get_team(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<TeamForest>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let forest = service::team_forest(&state.db, &actor).await?;
    Ok(Json(forest))
}

#[utoipa::path(
    get,
    path = "/api/team/members",
    responses(
        (status = 200, description = "Flat member list", body = Vec<TeamMember>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Team",
    security(("bearer_auth" = []))
)]
pub async fn get_members(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let members = service::list_members(&state.db, &actor).await?;
    Ok(Json(members))
}

#[utoipa::path(
    put,
    path = "/api/team/members/{id}/manager",
    params(
        ("id" = Uuid, Path, description = "Member user ID")
    ),
    request_body = ChangeManagerDto,
    responses(
        (status = 200, description = "Manager updated", body = MessageResponse),
        (status = 400, description = "Member cannot manage themselves"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Member not below the actor's level"),
        (status = 404, description = "Member or manager not found")
    ),
    tag = "Team",
    security(("bearer_auth" = []))
)]
pub async fn change_manager(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(member_id): Path<Uuid>,
    Json(dto): Json<ChangeManagerDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    service::change_manager(&state.db, &actor, member_id, dto).await?;
    Ok(Json(MessageResponse {
        message: "Manager updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/team/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member user ID")
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Member not below the actor's level"),
        (status = 404, description = "Member not found")
    ),
    tag = "Team",
    security(("bearer_auth" = []))
)]
pub async fn delete_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    service::delete_member(&state.db, &actor, member_id).await?;
    Ok(Json(MessageResponse {
        message: "Member removed successfully".to_string(),
    }))
}

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::auth_helpers::resolve_actor;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{PromoteMemberDto, RoleAssignmentResponse};
use super::policy::AssignableRole;
use super::service;

#[utoipa::path(
    get,
    path = "/api/team/assignable-roles",
    responses(
        (status = 200, description = "Roles the actor may grant, most senior first", body = Vec<AssignableRole>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn get_assignable_roles(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<AssignableRole>>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let roles = service::assignable_roles(&state.db, &actor).await?;
    Ok(Json(roles))
}

#[utoipa::path(
    put,
    path = "/api/team/members/{id}/role",
    params(
        ("id" = Uuid, Path, description = "Member user ID")
    ),
    request_body = PromoteMemberDto,
    responses(
        (status = 200, description = "Role updated", body = RoleAssignmentResponse),
        (status = 400, description = "Unrecognized role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requested level not below the actor's"),
        (status = 404, description = "Member not found")
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
pub async fn promote_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(member_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<PromoteMemberDto>,
) -> Result<Json<RoleAssignmentResponse>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let response = service::promote_member(&state.db, &actor, member_id, dto).await?;
    Ok(Json(response))
}

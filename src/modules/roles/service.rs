use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::hierarchy;
use crate::modules::roles::catalog::{self, Role, UNRANKED_LEVEL};
use crate::modules::roles::policy::{self, AssignableRole};
use crate::utils::auth_helpers::Actor;
use crate::utils::errors::AppError;

use super::model::{PromoteMemberDto, RoleAssignment, RoleAssignmentResponse};

/// Resolve a member's level from their role row. `None` when the member has
/// no role row at all.
#[instrument(skip(db))]
pub async fn member_level(db: &PgPool, user_id: Uuid) -> Result<Option<u8>, AppError> {
    let role: Option<(String,)> =
        sqlx::query_as("SELECT role FROM member_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

    Ok(role.map(|(role,)| catalog::level_of(&role)))
}

/// Replace a member's role row: clear any existing rows, then insert exactly
/// one. The defensive clear guards against a retry or double-invoke leaving
/// duplicate rows behind.
#[instrument(skip(db))]
pub async fn replace_role(
    db: &PgPool,
    user_id: Uuid,
    role: &Role,
    assigned_by: Uuid,
) -> Result<RoleAssignment, AppError> {
    sqlx::query("DELETE FROM member_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(db)
        .await?;

    let assignment = sqlx::query_as::<_, RoleAssignment>(
        "INSERT INTO member_roles (user_id, role, assigned_by)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, role, assigned_by, assigned_at",
    )
    .bind(user_id)
    .bind(role.key())
    .bind(assigned_by)
    .fetch_one(db)
    .await?;

    Ok(assignment)
}

/// Promote (or demote) a member of the actor's company.
///
/// The strict-inequality rule is enforced here, server-side, for both the
/// granted level and the member's current level; the client-side filter over
/// [`assignable_roles`] is a convenience mirror, not a trust boundary.
#[instrument(skip(db, actor))]
pub async fn promote_member(
    db: &PgPool,
    actor: &Actor,
    target_user_id: Uuid,
    dto: PromoteMemberDto,
) -> Result<RoleAssignmentResponse, AppError> {
    let role = Role::parse(&dto.role)
        .ok_or_else(|| AppError::bad_request(format!("Unrecognized role: {}", dto.role)))?;

    let target: Option<(Uuid,)> =
        sqlx::query_as("SELECT user_id FROM members WHERE user_id = $1 AND company_id = $2")
            .bind(target_user_id)
            .bind(actor.company_id)
            .fetch_optional(db)
            .await?;
    if target.is_none() {
        return Err(AppError::not_found("Member not found in your company"));
    }

    if !policy::can_assign(actor.level, role.level()) {
        return Err(AppError::forbidden(
            "You can only assign roles below your level",
        ));
    }

    let current_level = member_level(db, target_user_id)
        .await?
        .unwrap_or(UNRANKED_LEVEL);
    if !policy::can_assign(actor.level, current_level) {
        return Err(AppError::forbidden(
            "You can only change roles of members below your level",
        ));
    }

    let assignment = replace_role(db, target_user_id, &role, actor.user_id).await?;

    Ok(RoleAssignmentResponse {
        message: "Role updated successfully".to_string(),
        user_id: assignment.user_id,
        role: assignment.role,
    })
}

/// The roles the actor may grant in their company, filtered by the company's
/// hierarchy configuration.
#[instrument(skip(db, actor))]
pub async fn assignable_roles(db: &PgPool, actor: &Actor) -> Result<Vec<AssignableRole>, AppError> {
    let labels = hierarchy::service::fetch_labels(db, actor.company_id).await?;
    Ok(policy::assignable_roles(actor.level, &labels))
}

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::hierarchy::tree::{self, TeamForest, TeamMember};
use crate::modules::roles::catalog;
use crate::modules::roles::policy;
use crate::utils::auth_helpers::Actor;
use crate::utils::errors::AppError;

use super::model::{ChangeManagerDto, TeamMemberRecord};

#[instrument(skip(db))]
pub async fn fetch_team(db: &PgPool, company_id: Uuid) -> Result<Vec<TeamMember>, AppError> {
    let records = sqlx::query_as::<_, TeamMemberRecord>(
        "SELECT m.user_id, m.full_name, u.email, r.role, m.manager_id
         FROM members m
         JOIN users u ON u.id = m.user_id
         LEFT JOIN member_roles r ON r.user_id = m.user_id
         WHERE m.company_id = $1
         ORDER BY m.full_name",
    )
    .bind(company_id)
    .fetch_all(db)
    .await?;

    Ok(records
        .into_iter()
        .map(|record| {
            let role = record.role.unwrap_or_else(|| "unranked".to_string());
            TeamMember {
                level: catalog::level_of(&role),
                user_id: record.user_id,
                full_name: record.full_name,
                email: record.email,
                role,
                manager_id: record.manager_id,
            }
        })
        .collect())
}

/// The viewer-dependent display forest, rebuilt from the member list on
/// every call.
#[instrument(skip(db, actor))]
pub async fn team_forest(db: &PgPool, actor: &Actor) -> Result<TeamForest, AppError> {
    let members = fetch_team(db, actor.company_id).await?;
    Ok(tree::build_forest(members, actor.user_id, actor.level))
}

#[instrument(skip(db, actor))]
pub async fn list_members(db: &PgPool, actor: &Actor) -> Result<Vec<TeamMember>, AppError> {
    fetch_team(db, actor.company_id).await
}

/// Re-parent a member. The manager must belong to the same company and must
/// not be the member themselves. The manager-is-more-senior invariant is
/// advisory: a violation is logged, not rejected.
#[instrument(skip(db, actor))]
pub async fn change_manager(
    db: &PgPool,
    actor: &Actor,
    member_id: Uuid,
    dto: ChangeManagerDto,
) -> Result<(), AppError> {
    let members = fetch_team(db, actor.company_id).await?;
    let target = members
        .iter()
        .find(|m| m.user_id == member_id)
        .ok_or_else(|| AppError::not_found("Member not found in your company"))?;

    if !policy::can_assign(actor.level, target.level) {
        return Err(AppError::forbidden(
            "You can only re-assign members below your level",
        ));
    }

    if let Some(manager_id) = dto.manager_id {
        if manager_id == member_id {
            return Err(AppError::bad_request("A member cannot be their own manager"));
        }
        let manager = members
            .iter()
            .find(|m| m.user_id == manager_id)
            .ok_or_else(|| AppError::not_found("Manager not found in your company"))?;

        if manager.level >= target.level {
            tracing::warn!(
                member_id = %member_id,
                manager_id = %manager_id,
                member_level = target.level,
                manager_level = manager.level,
                "assigning a manager who is not more senior than the member"
            );
        }
    }

    sqlx::query("UPDATE members SET manager_id = $1, updated_at = NOW() WHERE user_id = $2")
        .bind(dto.manager_id)
        .bind(member_id)
        .execute(db)
        .await?;

    Ok(())
}

/// Delete a member: the identity row goes away, the profile and role row
/// cascade with it, and manager pointers at the deleted member are set to
/// null by the schema so no dangling references remain.
#[instrument(skip(db, actor))]
pub async fn delete_member(db: &PgPool, actor: &Actor, member_id: Uuid) -> Result<(), AppError> {
    if member_id == actor.user_id {
        return Err(AppError::bad_request("You cannot delete your own account"));
    }

    let target: Option<(Option<String>,)> = sqlx::query_as(
        "SELECT r.role FROM members m
         LEFT JOIN member_roles r ON r.user_id = m.user_id
         WHERE m.user_id = $1 AND m.company_id = $2",
    )
    .bind(member_id)
    .bind(actor.company_id)
    .fetch_optional(db)
    .await?;

    let target_level = match target {
        Some((role,)) => catalog::level_of(role.as_deref().unwrap_or("unranked")),
        None => return Err(AppError::not_found("Member not found in your company")),
    };

    if !policy::can_assign(actor.level, target_level) {
        return Err(AppError::forbidden(
            "You can only remove members below your level",
        ));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(member_id)
        .execute(db)
        .await?;

    Ok(())
}

//! Acting-user resolution.
//!
//! Handlers never reach into ambient session state: the verified user id
//! comes from the [`AuthUser`] extractor, and the actor's company, role,
//! and level are resolved here from the database and threaded explicitly
//! through service calls.

use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::roles::catalog::{self, COMPANY_ADMIN_LEVEL};
use crate::utils::errors::AppError;

/// The acting user with their database-resolved company and level.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub role: String,
    pub level: u8,
}

/// Resolve the actor behind a session.
///
/// Members resolve through their profile; a company owner whose profile was
/// never backfilled resolves through the ownership record instead and ranks
/// as a Company Admin unless a role row says otherwise. A user with neither
/// has no standing in any company.
pub async fn resolve_actor(db: &PgPool, auth_user: &AuthUser) -> Result<Actor, AppError> {
    let user_id = auth_user.user_id()?;

    let profile: Option<(Uuid, Option<String>)> = sqlx::query_as(
        "SELECT m.company_id, r.role
         FROM members m
         LEFT JOIN member_roles r ON r.user_id = m.user_id
         WHERE m.user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    if let Some((company_id, role)) = profile {
        let role = role.unwrap_or_else(|| "unranked".to_string());
        return Ok(Actor {
            user_id,
            company_id,
            level: catalog::level_of(&role),
            role,
        });
    }

    let owned: Option<(Uuid, Option<String>)> = sqlx::query_as(
        "SELECT c.id, r.role
         FROM companies c
         LEFT JOIN member_roles r ON r.user_id = c.owner_user_id
         WHERE c.owner_user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    match owned {
        Some((company_id, role)) => Ok(Actor {
            user_id,
            company_id,
            role: role.unwrap_or_else(|| "company".to_string()),
            level: COMPANY_ADMIN_LEVEL,
        }),
        None => Err(AppError::unauthorized(
            "Your account is not associated with a company",
        )),
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::email::EmailConfig;
use crate::metrics;
use crate::modules::roles::catalog::Role;
use crate::modules::roles::service as roles_service;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{InviteResponse, InviteTeamMemberDto};
use super::saga::{self, CompanyRef, DirectoryStore, IdentityService, MemberProfile};

pub struct PgIdentityService<'a> {
    pub db: &'a PgPool,
}

#[async_trait]
impl IdentityService for PgIdentityService<'_> {
    async fn create_identity(&self, email: &str, password: &str) -> Result<Uuid, AppError> {
        let hashed = hash_password(password)?;

        let row: (Uuid,) =
            sqlx::query_as("INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id")
                .bind(email)
                .bind(hashed)
                .fetch_one(self.db)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(db_err) = &e {
                        if db_err.is_unique_violation() {
                            return AppError::bad_request(
                                "A user with this email already exists",
                            );
                        }
                    }
                    AppError::from(e)
                })?;

        Ok(row.0)
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError> {
        // Zero rows affected is fine: the delete is a compensating action
        // and must tolerate an identity that is already gone.
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db)
            .await?;

        Ok(())
    }
}

pub struct PgDirectoryStore<'a> {
    pub db: &'a PgPool,
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore<'_> {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<MemberProfile>, AppError> {
        let row: Option<(Uuid, Uuid, String)> = sqlx::query_as(
            "SELECT user_id, company_id, full_name FROM members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db)
        .await?;

        Ok(row.map(|(user_id, company_id, full_name)| MemberProfile {
            user_id,
            company_id,
            full_name,
        }))
    }

    async fn find_owned_company(&self, owner_id: Uuid) -> Result<Option<CompanyRef>, AppError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM companies WHERE owner_user_id = $1")
                .bind(owner_id)
                .fetch_optional(self.db)
                .await?;

        Ok(row.map(|(id, name)| CompanyRef { id, name }))
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        full_name: &str,
        manager_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO members (user_id, company_id, full_name, manager_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE
             SET company_id = EXCLUDED.company_id,
                 full_name = EXCLUDED.full_name,
                 manager_id = EXCLUDED.manager_id,
                 updated_at = NOW()",
        )
        .bind(user_id)
        .bind(company_id)
        .bind(full_name)
        .bind(manager_id)
        .execute(self.db)
        .await?;

        Ok(())
    }

    async fn member_role_level(&self, user_id: Uuid) -> Result<Option<u8>, AppError> {
        roles_service::member_level(self.db, user_id).await
    }

    async fn replace_role(
        &self,
        user_id: Uuid,
        role: &Role,
        assigned_by: Uuid,
    ) -> Result<(), AppError> {
        roles_service::replace_role(self.db, user_id, role, assigned_by)
            .await
            .map(|_| ())
    }
}

/// Handle `POST /api/team/invite` for an authenticated requester: run the
/// saga, then send a best-effort notification email. Email failures are
/// logged, never surfaced; the member is already created.
#[instrument(skip(db, email_config, dto), fields(requester = %requester_id))]
pub async fn invite_team_member(
    db: &PgPool,
    email_config: &EmailConfig,
    requester_id: Uuid,
    dto: InviteTeamMemberDto,
) -> Result<InviteResponse, AppError> {
    let identity = PgIdentityService { db };
    let directory = PgDirectoryStore { db };

    let outcome = saga::invite_member(&identity, &directory, requester_id, &dto).await?;
    metrics::track_member_invited(&dto.role);

    if let Some((company_name,)) = sqlx::query_as::<_, (String,)>(
        "SELECT c.name FROM companies c
         JOIN members m ON m.company_id = c.id
         WHERE m.user_id = $1",
    )
    .bind(requester_id)
    .fetch_optional(db)
    .await?
    {
        let email_service = EmailService::new(email_config.clone());
        if let Err(err) = email_service
            .send_invitation_email(&dto.email, &dto.full_name, &company_name)
            .await
        {
            tracing::warn!(error = %err.message(), "invitation email could not be sent");
        }
    }

    Ok(InviteResponse {
        success: true,
        user_id: outcome.user_id,
        message: format!("{} has been invited to your team", dto.full_name),
    })
}

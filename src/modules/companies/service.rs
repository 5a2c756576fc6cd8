use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::modules::invitations::saga::IdentityService;
use crate::modules::invitations::service::PgIdentityService;
use crate::modules::roles::catalog::Role;
use crate::modules::roles::service as roles_service;
use crate::utils::auth_helpers::Actor;
use crate::utils::errors::AppError;

use super::model::{Company, RegisterCompanyDto, RegisterCompanyResponse};

/// Create a company and its first Company Admin.
///
/// Same shape as the invitation workflow: the identity is created first and
/// every later failure deletes it before the error is surfaced. The company
/// row cascades with the identity, so one compensating delete covers all
/// steps.
#[instrument(skip(db, dto))]
pub async fn register_company(
    db: &PgPool,
    dto: RegisterCompanyDto,
) -> Result<RegisterCompanyResponse, AppError> {
    let identity = PgIdentityService { db };
    let user_id = identity.create_identity(&dto.email, &dto.password).await?;

    let result: Result<Uuid, AppError> = async {
        let (company_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO companies (name, industry, owner_user_id)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&dto.company_name)
        .bind(&dto.industry)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        sqlx::query(
            "INSERT INTO members (user_id, company_id, full_name, manager_id)
             VALUES ($1, $2, $3, NULL)",
        )
        .bind(user_id)
        .bind(company_id)
        .bind(&dto.full_name)
        .execute(db)
        .await?;

        roles_service::replace_role(db, user_id, &Role::CompanyAdmin, user_id).await?;

        Ok(company_id)
    }
    .await;

    match result {
        Ok(company_id) => {
            metrics::track_company_registered();
            Ok(RegisterCompanyResponse {
                success: true,
                company_id,
                user_id,
                message: format!("{} is ready to go", dto.company_name),
            })
        }
        Err(err) => {
            if let Err(rollback_err) = identity.delete_identity(user_id).await {
                tracing::error!(
                    user_id = %user_id,
                    error = %rollback_err.message(),
                    "failed to roll back identity after partial company registration"
                );
            }
            Err(err)
        }
    }
}

#[instrument(skip(db, actor))]
pub async fn get_company(db: &PgPool, actor: &Actor) -> Result<Company, AppError> {
    sqlx::query_as::<_, Company>(
        "SELECT id, name, industry, owner_user_id, created_at FROM companies WHERE id = $1",
    )
    .bind(actor.company_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found("Company not found"))
}

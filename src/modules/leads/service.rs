use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::utils::auth_helpers::Actor;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    AssignLeadDto, CreateLeadDto, LEAD_STATUSES, Lead, LeadFilterParams, PaginatedLeadsResponse,
    UpdateLeadStatusDto,
};

const LEAD_COLUMNS: &str =
    "id, company_id, full_name, email, phone, source, status, assigned_to, created_at, updated_at";

#[instrument(skip(db, actor, dto))]
pub async fn create_lead(db: &PgPool, actor: &Actor, dto: CreateLeadDto) -> Result<Lead, AppError> {
    let lead = sqlx::query_as::<_, Lead>(&format!(
        "INSERT INTO leads (company_id, full_name, email, phone, source)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        LEAD_COLUMNS
    ))
    .bind(actor.company_id)
    .bind(&dto.full_name)
    .bind(&dto.email)
    .bind(&dto.phone)
    .bind(&dto.source)
    .fetch_one(db)
    .await?;

    metrics::track_lead_captured(lead.source.as_deref().unwrap_or("unknown"));
    Ok(lead)
}

#[instrument(skip(db, actor, params))]
pub async fn get_leads(
    db: &PgPool,
    actor: &Actor,
    params: LeadFilterParams,
) -> Result<PaginatedLeadsResponse, AppError> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }

    let pagination = params.pagination();
    let limit = pagination.limit();
    let offset = pagination.offset();

    let leads = sqlx::query_as::<_, Lead>(&format!(
        "SELECT {}
         FROM leads
         WHERE company_id = $1 AND ($2::text IS NULL OR status = $2)
         ORDER BY created_at DESC
         LIMIT $3 OFFSET $4",
        LEAD_COLUMNS
    ))
    .bind(actor.company_id)
    .bind(&params.status)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM leads
         WHERE company_id = $1 AND ($2::text IS NULL OR status = $2)",
    )
    .bind(actor.company_id)
    .bind(&params.status)
    .fetch_one(db)
    .await?;

    let has_more = offset + (leads.len() as i64) < total;
    let meta = PaginationMeta {
        total,
        limit,
        offset: Some(offset),
        page: pagination.page(),
        has_more,
    };

    Ok(PaginatedLeadsResponse { data: leads, meta })
}

/// Hand a lead to a member of the same company.
#[instrument(skip(db, actor))]
pub async fn assign_lead(
    db: &PgPool,
    actor: &Actor,
    lead_id: Uuid,
    dto: AssignLeadDto,
) -> Result<Lead, AppError> {
    let member: Option<(Uuid,)> =
        sqlx::query_as("SELECT user_id FROM members WHERE user_id = $1 AND company_id = $2")
            .bind(dto.assigned_to)
            .bind(actor.company_id)
            .fetch_optional(db)
            .await?;
    if member.is_none() {
        return Err(AppError::not_found("Member not found in your company"));
    }

    sqlx::query_as::<_, Lead>(&format!(
        "UPDATE leads SET assigned_to = $1, updated_at = NOW()
         WHERE id = $2 AND company_id = $3
         RETURNING {}",
        LEAD_COLUMNS
    ))
    .bind(dto.assigned_to)
    .bind(lead_id)
    .bind(actor.company_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found("Lead not found"))
}

#[instrument(skip(db, actor))]
pub async fn update_lead_status(
    db: &PgPool,
    actor: &Actor,
    lead_id: Uuid,
    dto: UpdateLeadStatusDto,
) -> Result<Lead, AppError> {
    validate_status(&dto.status)?;

    sqlx::query_as::<_, Lead>(&format!(
        "UPDATE leads SET status = $1, updated_at = NOW()
         WHERE id = $2 AND company_id = $3
         RETURNING {}",
        LEAD_COLUMNS
    ))
    .bind(&dto.status)
    .bind(lead_id)
    .bind(actor.company_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found("Lead not found"))
}

fn validate_status(status: &str) -> Result<(), AppError> {
    if LEAD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "Unknown lead status: {} (expected one of {})",
            status,
            LEAD_STATUSES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_status_accepts_pipeline_stages() {
        for status in LEAD_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn test_validate_status_rejects_unknown() {
        assert!(validate_status("archived").is_err());
        assert!(validate_status("").is_err());
        assert!(validate_status("New").is_err());
    }
}

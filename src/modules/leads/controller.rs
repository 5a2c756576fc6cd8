use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::auth_helpers::resolve_actor;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AssignLeadDto, CreateLeadDto, Lead, LeadFilterParams, PaginatedLeadsResponse,
    UpdateLeadStatusDto,
};
use super::service;

#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = CreateLeadDto,
    responses(
        (status = 200, description = "Lead captured", body = Lead),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    tag = "Leads",
    security(("bearer_auth" = []))
)]
pub async fn create_lead(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLeadDto>,
) -> Result<Json<Lead>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let lead = service::create_lead(&state.db, &actor, dto).await?;
    Ok(Json(lead))
}

#[utoipa::path(
    get,
    path = "/api/leads",
    params(
        ("status" = Option<String>, Query, description = "Filter by pipeline status"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Row offset, ignored when page is given")
    ),
    responses(
        (status = 200, description = "Company leads", body = PaginatedLeadsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Leads",
    security(("bearer_auth" = []))
)]
pub async fn get_leads(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<LeadFilterParams>,
) -> Result<Json<PaginatedLeadsResponse>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let leads = service::get_leads(&state.db, &actor, params).await?;
    Ok(Json(leads))
}

#[utoipa::path(
    put,
    path = "/api/leads/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    request_body = AssignLeadDto,
    responses(
        (status = 200, description = "Lead assigned", body = Lead),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead or member not found")
    ),
    tag = "Leads",
    security(("bearer_auth" = []))
)]
pub async fn assign_lead(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(lead_id): Path<Uuid>,
    Json(dto): Json<AssignLeadDto>,
) -> Result<Json<Lead>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let lead = service::assign_lead(&state.db, &actor, lead_id, dto).await?;
    Ok(Json(lead))
}

#[utoipa::path(
    put,
    path = "/api/leads/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    request_body = UpdateLeadStatusDto,
    responses(
        (status = 200, description = "Status updated", body = Lead),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads",
    security(("bearer_auth" = []))
)]
pub async fn update_lead_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(lead_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLeadStatusDto>,
) -> Result<Json<Lead>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let lead = service::update_lead_status(&state.db, &actor, lead_id, dto).await?;
    Ok(Json(lead))
}

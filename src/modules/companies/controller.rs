use axum::{Json, extract::State};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::auth_helpers::resolve_actor;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Company, RegisterCompanyDto, RegisterCompanyResponse};
use super::service;

/// Register a company and its first Company Admin
#[utoipa::path(
    post,
    path = "/api/companies/register",
    request_body = RegisterCompanyDto,
    responses(
        (status = 200, description = "Company registered", body = RegisterCompanyResponse),
        (status = 400, description = "Malformed input or duplicate email"),
        (status = 500, description = "Partial failure, already rolled back")
    ),
    tag = "Companies"
)]
pub async fn register_company(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterCompanyDto>,
) -> Result<Json<RegisterCompanyResponse>, AppError> {
    let response = service::register_company(&state.db, dto).await?;
    Ok(Json(response))
}

/// The actor's company
#[utoipa::path(
    get,
    path = "/api/companies/me",
    responses(
        (status = 200, description = "The actor's company", body = Company),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn get_my_company(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Company>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let company = service::get_company(&state.db, &actor).await?;
    Ok(Json(company))
}

use axum::{Json, extract::State};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::auth_helpers::resolve_actor;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LegendEntry, UpdateLabelDto};
use super::service;

#[utoipa::path(
    get,
    path = "/api/hierarchy/legend",
    responses(
        (status = 200, description = "Offered levels with labels, most senior first", body = Vec<LegendEntry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Hierarchy",
    security(("bearer_auth" = []))
)]
pub async fn get_legend(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<LegendEntry>>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    let entries = service::legend(&state.db, actor.company_id).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/hierarchy/labels",
    request_body = UpdateLabelDto,
    responses(
        (status = 200, description = "Updated legend", body = Vec<LegendEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Actor is not a Company Admin"),
        (status = 422, description = "Level out of range or label too long")
    ),
    tag = "Hierarchy",
    security(("bearer_auth" = []))
)]
pub async fn update_label(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateLabelDto>,
) -> Result<Json<Vec<LegendEntry>>, AppError> {
    let actor = resolve_actor(&state.db, &auth_user).await?;
    service::update_label(&state.db, &actor, dto).await?;
    let entries = service::legend(&state.db, actor.company_id).await?;
    Ok(Json(entries))
}

//! Level-based gating for whole routes.
//!
//! This is the convenience mirror of the authorization rule: it rejects
//! early from the session claims. Handlers behind it still resolve the
//! actor's level from the database and enforce the rule authoritatively.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthUser;
use crate::modules::roles::catalog::COMPANY_ADMIN_LEVEL;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Gate a route to Company Admin sessions.
pub async fn require_company_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    if auth_user.level() != COMPANY_ADMIN_LEVEL {
        return Err(AppError::forbidden(
            "Only a Company Admin can access this resource",
        ));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::Claims;
use crate::modules::roles::catalog;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and exposes the session claims.
///
/// The claims carry the role key the user logged in with; [`AuthUser::level`]
/// ranks it for convenience filtering. Authorization decisions re-resolve the
/// level from the database; the token is a session, not a trust boundary
/// for hierarchy state that may have changed since login.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn company_id(&self) -> Option<Uuid> {
        self.0.company_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Rank the session's role key. Unrecognized roles sort last.
    pub fn level(&self) -> u8 {
        catalog::level_of(&self.0.role)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = verify_token(token, &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with_role(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "agent@acme.test".to_string(),
            company_id: None,
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_level_from_role_key() {
        assert_eq!(AuthUser(claims_with_role("company")).level(), 1);
        assert_eq!(AuthUser(claims_with_role("subadmin")).level(), 2);
        assert_eq!(AuthUser(claims_with_role("level_10")).level(), 10);
        assert_eq!(AuthUser(claims_with_role("whatever")).level(), 99);
    }

    #[test]
    fn test_user_id_round_trip() {
        let user_id = Uuid::new_v4();
        let mut claims = claims_with_role("company");
        claims.sub = user_id.to_string();
        assert_eq!(AuthUser(claims).user_id().unwrap(), user_id);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let mut claims = claims_with_role("company");
        claims.sub = "not-a-uuid".to_string();
        assert!(AuthUser(claims).user_id().is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub company_id: Option<Uuid>,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// The authenticated user as returned by login and profile endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub company_id: Option<Uuid>,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthenticatedUser,
}

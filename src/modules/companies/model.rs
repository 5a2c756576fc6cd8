use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A tenant. `owner_user_id` is the tenant-ownership record; the invitation
/// workflow falls back to it when the owner has no member profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub owner_user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `POST /api/companies/register`: the company and its first
/// Company Admin in one request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Company name must be between 1 and 100 characters"
    ))]
    pub company_name: String,
    /// Optional industry tag driving per-industry customization (e.g.
    /// `real_estate`).
    #[validate(length(max = 50, message = "Industry must not exceed 50 characters"))]
    pub industry: Option<String>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    pub full_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyResponse {
    pub success: bool,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
}

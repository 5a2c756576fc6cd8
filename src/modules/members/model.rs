use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A member's profile within one company. `manager_id` is a plain hierarchy
/// pointer to another member of the same company, not an ownership edge.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub manager_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Join row used to load a company's team in one query: profile, identity
/// email, and the (optional) role row.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberRecord {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeManagerDto {
    /// `null` detaches the member from their manager.
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

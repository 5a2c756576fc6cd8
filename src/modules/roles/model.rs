use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A member's single role row. The schema enforces at most one row per user;
/// assignments always replace rather than accumulate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoleAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub assigned_by: Option<Uuid>,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PromoteMemberDto {
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleAssignmentResponse {
    pub message: String,
    pub user_id: Uuid,
    pub role: String,
}

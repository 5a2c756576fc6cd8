use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// Pipeline stages a lead moves through.
pub const LEAD_STATUSES: &[&str] = &["new", "contacted", "qualified", "won", "lost"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub assigned_to: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Lead name must be between 1 and 100 characters"
    ))]
    pub full_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    #[validate(length(max = 30, message = "Phone must not exceed 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 50, message = "Source must not exceed 50 characters"))]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignLeadDto {
    pub assigned_to: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLeadStatusDto {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Query parameters for filtering and paginating leads. Kept flat: query
/// strings deserialize field by field, so nesting does not survive the
/// urlencoded path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LeadFilterParams {
    /// Filter by pipeline status
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LeadFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
            page: self.page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLeadsResponse {
    pub data: Vec<Lead>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params_all_optional() {
        let params: LeadFilterParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.status, None);
        assert_eq!(params.pagination().limit(), 10);
        assert_eq!(params.pagination().offset(), 0);
    }

    #[test]
    fn test_filter_params_feed_pagination() {
        let params: LeadFilterParams =
            serde_json::from_str(r#"{"status":"qualified","page":3,"limit":20}"#).unwrap();
        assert_eq!(params.status.as_deref(), Some("qualified"));

        let pagination = params.pagination();
        assert_eq!(pagination.limit(), 20);
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.page(), Some(3));
    }
}

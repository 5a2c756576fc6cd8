//! List pagination.
//!
//! Query structs keep `page`/`limit`/`offset` as flat optional fields (query
//! strings deserialize field by field) and hand them to [`PaginationParams`]
//! for the defaulting and clamping rules. `page` wins over `offset` when
//! both are supplied.

use serde::Serialize;
use utoipa::ToSchema;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1) * self.limit(),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams { limit, offset, page }
    }

    #[test]
    fn test_defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_clamped_to_bounds() {
        assert_eq!(params(Some(0), None, None).limit(), 1);
        assert_eq!(params(Some(-3), None, None).limit(), 1);
        assert_eq!(params(Some(100), None, None).limit(), 100);
        assert_eq!(params(Some(250), None, None).limit(), 100);
    }

    #[test]
    fn test_negative_offset_floors_at_zero() {
        assert_eq!(params(Some(10), Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_page_wins_over_offset() {
        let p = params(Some(10), Some(99), Some(3));
        assert_eq!(p.offset(), 20);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_non_positive_page_floors_at_first() {
        assert_eq!(params(Some(10), None, Some(0)).offset(), 0);
        assert_eq!(params(Some(10), None, Some(-2)).page(), Some(1));
    }

    #[test]
    fn test_meta_omits_absent_fields() {
        let meta = PaginationMeta {
            total: 7,
            limit: 10,
            offset: None,
            page: Some(1),
            has_more: false,
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains(r#""total":7"#));
        assert!(json.contains(r#""page":1"#));
        assert!(!json.contains("offset"));
    }
}

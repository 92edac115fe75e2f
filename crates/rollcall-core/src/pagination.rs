//! Pagination utilities for list endpoints.
//!
//! Page-based pagination over `limit` and `page`:
//! - `limit`: items per page, clamped to [1, 100], default 10
//! - `page`: 1-indexed page number, default 1
//!
//! Empty query values (`?page=`) are treated as absent.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata attached to paginated responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    /// Whether a further page may exist
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Rows to skip. Saturates so a huge `page` reads past the end instead of
    /// overflowing.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Builds response metadata from the number of rows actually returned.
    #[must_use]
    pub fn meta(&self, returned: usize) -> PaginationMeta {
        PaginationMeta {
            page: self.page(),
            limit: self.limit(),
            has_more: returned as i64 == self.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(500),
            page: None,
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            limit: Some(0),
            page: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PaginationParams {
            limit: Some(20),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_negative_page_is_first_page() {
        let params = PaginationParams {
            limit: None,
            page: Some(-4),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let params = PaginationParams {
            limit: Some(50),
            page: Some(i64::MAX),
        };
        assert_eq!(params.offset(), i64::MAX);
        assert_eq!(params.meta(0).page, i64::MAX);
    }

    #[test]
    fn test_empty_strings_deserialize_as_none() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit": "", "page": "2"}"#).unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.page, Some(2));
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(2),
            page: Some(1),
        };
        assert!(params.meta(2).has_more);
        assert!(!params.meta(1).has_more);
    }
}

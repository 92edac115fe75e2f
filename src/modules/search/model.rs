use rollcall_core::AppError;
use rollcall_models::{ResourceKind, ResourceSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Kinds covered by cross-tenant search.
pub const SEARCHABLE_KINDS: [ResourceKind; 3] = [
    ResourceKind::Student,
    ResourceKind::Event,
    ResourceKind::Announcement,
];

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive label fragment
    #[validate(length(min = 1, max = 100, message = "q must be between 1 and 100 characters"))]
    pub q: String,
    /// Comma-separated kinds to search (default: students, events, announcements)
    pub kinds: Option<String>,
    /// Maximum results per kind (1-50, default: 20)
    #[validate(range(min = 1, max = 50, message = "limit must be between 1 and 50"))]
    pub limit: Option<i64>,
}

impl SearchParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20)
    }

    pub fn kinds(&self) -> Result<Vec<ResourceKind>, AppError> {
        let Some(raw) = self.kinds.as_deref().filter(|raw| !raw.trim().is_empty()) else {
            return Ok(SEARCHABLE_KINDS.to_vec());
        };

        let mut kinds = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let kind: ResourceKind = part.parse().map_err(AppError::bad_request)?;
            if !SEARCHABLE_KINDS.contains(&kind) {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "{} is not searchable",
                    kind.plural()
                )));
            }
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ResourceSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(kinds: Option<&str>) -> SearchParams {
        SearchParams {
            q: "ada".to_string(),
            kinds: kinds.map(str::to_string),
            limit: None,
        }
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(params(None).kinds().unwrap(), SEARCHABLE_KINDS.to_vec());
        assert_eq!(params(Some(" ")).kinds().unwrap(), SEARCHABLE_KINDS.to_vec());
    }

    #[test]
    fn test_kinds_are_parsed_and_deduplicated() {
        let kinds = params(Some("events, event,students")).kinds().unwrap();
        assert_eq!(kinds, vec![ResourceKind::Event, ResourceKind::Student]);
    }

    #[test]
    fn test_unsearchable_kind_is_rejected() {
        assert!(params(Some("classes")).kinds().is_err());
        assert!(params(Some("grades")).kinds().is_err());
    }

    #[test]
    fn test_validation() {
        let mut p = params(None);
        assert!(p.validate().is_ok());
        p.q = String::new();
        assert!(p.validate().is_err());
        p.q = "ada".to_string();
        p.limit = Some(500);
        assert!(p.validate().is_err());
    }
}

use rollcall_access::{Identity, Predicate};
use rollcall_models::{ResourceKind, Role, SchoolId, UserId};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityResponse {
    pub subject_id: UserId,
    pub role: Role,
    /// Present for staff roles only
    pub school_id: Option<SchoolId>,
    /// Present for parents only: the schools of their linked children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_school_ids: Option<Vec<SchoolId>>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            subject_id: identity.subject_id(),
            role: identity.role(),
            school_id: identity.school_id(),
            tenant_school_ids: identity
                .tenant_school_ids()
                .map(|schools| schools.iter().copied().collect()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolsResponse {
    pub school_ids: Vec<SchoolId>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterResponse {
    pub kind: ResourceKind,
    pub predicate: Predicate,
}

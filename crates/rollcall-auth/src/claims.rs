//! Claim structures carried by bearer credentials.

use rollcall_models::{Role, SchoolId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Raw JWT claims.
///
/// `school_id` and `tenant_id` are advisory: a token minted before a staff
/// reassignment still carries the old school, so the identity resolver always
/// re-derives tenancy from the backing profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// The minimal claim set produced by a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub subject_id: UserId,
    pub role: Role,
    /// Tenant hint from the token. Never used for access decisions.
    pub advisory_school_id: Option<SchoolId>,
}

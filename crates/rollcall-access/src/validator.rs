//! Instance-level access decisions.

use rollcall_auth::AuthError;
use rollcall_models::{ResourceId, ResourceKind};

use crate::identity::Identity;
use crate::policy::policy_for;
use crate::repository::AccessRepository;

/// Answers whether `identity` may act on the resource `(kind, id)`.
///
/// A target that does not exist yields `Ok(false)`; only store failures are
/// errors.
pub async fn can_access(
    identity: &Identity,
    kind: ResourceKind,
    id: ResourceId,
    repo: &dyn AccessRepository,
) -> Result<bool, AuthError> {
    policy_for(identity.role())
        .can_access(identity, kind, id, repo)
        .await
}

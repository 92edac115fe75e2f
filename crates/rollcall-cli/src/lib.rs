//! Operator tooling for Rollcall.
//!
//! - `issue-token`: mint a development bearer token
//! - `explain`: show how the engine sees a token and what it may access

use rollcall_access::{AccessEngine, Identity, Predicate};
use rollcall_auth::AuthError;
use rollcall_models::{ResourceId, ResourceKind};
use serde::Serialize;

/// Everything the engine decides for one token and resource kind.
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub identity: Identity,
    pub kind: ResourceKind,
    pub predicate: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
}

#[derive(Debug, Serialize)]
pub struct Decision {
    pub resource_id: ResourceId,
    pub allowed: bool,
}

/// Resolves the token and reports the scoping predicate for `kind`, plus the
/// instance decision when `id` is given. Parents are shown with their
/// resolved schools.
pub async fn explain(
    engine: &AccessEngine,
    token: &str,
    kind: ResourceKind,
    id: Option<ResourceId>,
) -> Result<Explanation, AuthError> {
    let identity = engine.resolve_identity(token).await?;
    let identity = engine.scoped_identity(identity).await?;
    let predicate = engine.build_filter(&identity, kind);

    let decision = match id {
        Some(resource_id) => Some(Decision {
            resource_id,
            allowed: engine.can_access(&identity, kind, resource_id).await?,
        }),
        None => None,
    };

    Ok(Explanation {
        identity,
        kind,
        predicate,
        decision,
    })
}

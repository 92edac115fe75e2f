//! Parent tenant resolution.

use std::collections::BTreeSet;

use rollcall_auth::AuthError;
use rollcall_models::{SchoolId, UserId};

use crate::repository::AccessRepository;

/// Distinct schools reachable through the parent's linked children.
///
/// Empty when the parent has no links. Order carries no meaning.
#[tracing::instrument(skip(repo), level = "debug")]
pub async fn resolve_parent_schools(
    parent_id: UserId,
    repo: &dyn AccessRepository,
) -> Result<BTreeSet<SchoolId>, AuthError> {
    let schools: BTreeSet<SchoolId> = repo
        .parent_school_ids(parent_id)
        .await?
        .into_iter()
        .collect();
    tracing::debug!(school_count = schools.len(), "Resolved parent schools");
    Ok(schools)
}

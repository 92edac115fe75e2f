//! Attaches tenancy to verified claims.
//!
//! Tenancy always comes from the backing profile. The advisory school carried
//! by the token is only compared against it so stale tokens show up in logs.

use rollcall_auth::{AuthError, VerifiedClaims};
use rollcall_models::Role;

use crate::identity::Identity;
use crate::repository::AccessRepository;

#[tracing::instrument(
    skip(claims, repo),
    fields(subject_id = %claims.subject_id, role = %claims.role)
)]
pub async fn resolve_identity_context(
    claims: &VerifiedClaims,
    repo: &dyn AccessRepository,
) -> Result<Identity, AuthError> {
    let result = resolve(claims, repo).await;

    let outcome = match &result {
        Ok(_) => "resolved",
        Err(err) => err.reason(),
    };
    metrics::counter!(
        "identity_resolutions_total",
        "role" => claims.role.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    result
}

async fn resolve(
    claims: &VerifiedClaims,
    repo: &dyn AccessRepository,
) -> Result<Identity, AuthError> {
    let subject_id = claims.subject_id;

    match claims.role {
        Role::SuperAdmin => Ok(Identity::super_admin(subject_id)),
        Role::Parent => {
            if !repo.parent_profile_exists(subject_id).await? {
                return Err(incomplete(claims));
            }
            if claims.advisory_school_id.is_some() {
                tracing::debug!("Ignoring school claim on parent credential");
            }
            Ok(Identity::parent(subject_id))
        }
        role @ (Role::SchoolAdmin | Role::Principal | Role::Teacher) => {
            let Some(profile) = repo.staff_profile(subject_id, role).await? else {
                return Err(incomplete(claims));
            };

            let stale = claims
                .advisory_school_id
                .filter(|advisory| *advisory != profile.school_id);
            if let Some(advisory) = stale {
                tracing::warn!(
                    security.event = "stale_school_claim",
                    claimed_school_id = %advisory,
                    profile_school_id = %profile.school_id,
                    "Token school claim disagrees with staff profile; using profile"
                );
            }

            Ok(Identity::staff(subject_id, role, profile.school_id))
        }
    }
}

fn incomplete(claims: &VerifiedClaims) -> AuthError {
    tracing::warn!(
        security.event = "identity_incomplete",
        "No profile backs this credential"
    );
    AuthError::IdentityIncomplete {
        subject_id: claims.subject_id,
        role: claims.role,
    }
}

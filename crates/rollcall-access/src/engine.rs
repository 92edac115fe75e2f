//! The access engine facade handed to controllers.
//!
//! # Example
//!
//! ```ignore
//! let engine = AccessEngine::new(JwtConfig::from_env(), repo);
//!
//! let identity = engine.authorize(token, &VIEW_RESOURCES).await?;
//! let predicate = engine.build_filter(&identity, ResourceKind::Student);
//! engine.require_access(&identity, ResourceKind::Student, student_id).await?;
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use rollcall_auth::{AuthError, verify_token};
use rollcall_config::JwtConfig;
use rollcall_models::{ResourceId, ResourceKind, Role, SchoolId, UserId};

use crate::filter::{Predicate, build_filter};
use crate::identity::Identity;
use crate::repository::AccessRepository;
use crate::resolver::resolve_identity_context;
use crate::role_gate::{OperationConfig, check_role};
use crate::schools::resolve_parent_schools;
use crate::validator;

#[derive(Clone)]
pub struct AccessEngine {
    jwt_config: JwtConfig,
    repo: Arc<dyn AccessRepository>,
}

impl AccessEngine {
    pub fn new(jwt_config: JwtConfig, repo: Arc<dyn AccessRepository>) -> Self {
        Self { jwt_config, repo }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Verifies the credential and resolves its tenancy. No role gate.
    pub async fn resolve_identity(&self, credential: &str) -> Result<Identity, AuthError> {
        let claims = verify_token(credential, &self.jwt_config)?;
        resolve_identity_context(&claims, self.repo.as_ref()).await
    }

    /// Verifier, then role gate, then identity resolution.
    ///
    /// A caller outside `operation`'s roles is rejected before any store read.
    pub async fn authorize(
        &self,
        credential: &str,
        operation: &OperationConfig,
    ) -> Result<Identity, AuthError> {
        let claims = verify_token(credential, &self.jwt_config)?;
        check_role(claims.role, operation)?;
        resolve_identity_context(&claims, self.repo.as_ref()).await
    }

    pub fn build_filter(&self, identity: &Identity, kind: ResourceKind) -> Predicate {
        build_filter(identity, kind)
    }

    #[tracing::instrument(
        skip(self, identity),
        fields(subject_id = %identity.subject_id(), role = %identity.role())
    )]
    pub async fn can_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
    ) -> Result<bool, AuthError> {
        let result = validator::can_access(identity, kind, id, self.repo.as_ref()).await;

        let outcome = match &result {
            Ok(true) => "granted",
            Ok(false) => "denied",
            Err(_) => "error",
        };
        metrics::counter!(
            "access_decisions_total",
            "kind" => kind.as_str(),
            "role" => identity.role().as_str(),
            "outcome" => outcome
        )
        .increment(1);
        tracing::debug!(outcome, "Access decision");

        result
    }

    /// Like [`AccessEngine::can_access`], mapping a denial to
    /// [`AuthError::NotFound`] so it reads the same as a missing resource.
    pub async fn require_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
    ) -> Result<(), AuthError> {
        if self.can_access(identity, kind, id).await? {
            Ok(())
        } else {
            Err(AuthError::NotFound(kind))
        }
    }

    pub async fn resolve_parent_schools(
        &self,
        parent_id: UserId,
    ) -> Result<BTreeSet<SchoolId>, AuthError> {
        resolve_parent_schools(parent_id, self.repo.as_ref()).await
    }

    /// Attaches the resolved school set to a parent identity. Other identities,
    /// and parents that already carry a set, are returned unchanged.
    pub async fn scoped_identity(&self, identity: Identity) -> Result<Identity, AuthError> {
        if identity.role() != Role::Parent || identity.tenant_school_ids().is_some() {
            return Ok(identity);
        }
        let schools = self.resolve_parent_schools(identity.subject_id()).await?;
        Ok(identity.with_tenant_schools(schools))
    }
}

//! The per-request identity produced by identity resolution.

use std::collections::BTreeSet;

use rollcall_models::{Role, SchoolId, UserId};
use serde::Serialize;

/// Who is calling, and which tenant(s) their data is bounded by.
///
/// Staff identities carry exactly one resolved school. Parent identities never
/// do; their visibility is the set of schools of their linked children, which
/// may be attached once per request with [`Identity::with_tenant_schools`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    subject_id: UserId,
    role: Role,
    school_id: Option<SchoolId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant_school_ids: Option<BTreeSet<SchoolId>>,
}

impl Identity {
    pub fn super_admin(subject_id: UserId) -> Self {
        Self {
            subject_id,
            role: Role::SuperAdmin,
            school_id: None,
            tenant_school_ids: None,
        }
    }

    /// A school-bound staff identity: school admin, principal or teacher.
    pub fn staff(subject_id: UserId, role: Role, school_id: SchoolId) -> Self {
        Self {
            subject_id,
            role,
            school_id: Some(school_id),
            tenant_school_ids: None,
        }
    }

    pub fn parent(subject_id: UserId) -> Self {
        Self {
            subject_id,
            role: Role::Parent,
            school_id: None,
            tenant_school_ids: None,
        }
    }

    /// Returns a copy carrying the parent's resolved school set.
    ///
    /// Has no effect on non-parent identities.
    pub fn with_tenant_schools(mut self, school_ids: BTreeSet<SchoolId>) -> Self {
        if self.role == Role::Parent {
            self.tenant_school_ids = Some(school_ids);
        }
        self
    }

    pub fn subject_id(&self) -> UserId {
        self.subject_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn school_id(&self) -> Option<SchoolId> {
        self.school_id
    }

    pub fn tenant_school_ids(&self) -> Option<&BTreeSet<SchoolId>> {
        self.tenant_school_ids.as_ref()
    }
}

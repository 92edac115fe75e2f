//! Storage-agnostic scoping predicates.
//!
//! A [`Predicate`] bounds which rows of one resource kind an identity may see.
//! It is data, not a closure: `rollcall-db` compiles it to SQL and
//! [`crate::memory`] evaluates it over in-memory records. Both must agree.

use rollcall_models::{ResourceKind, SchoolId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::identity::Identity;
use crate::policy::policy_for;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Every row.
    Unrestricted,
    /// Rows whose `school_id` equals the given school.
    SchoolEquals { school_id: SchoolId },
    /// Rows hanging off a class the teacher supervises or teaches a lesson in.
    TeacherScoped { teacher_id: UserId },
    /// Student rows linked to the parent. Matches nothing for other kinds.
    ParentScoped { parent_id: UserId },
    /// Rows whose `school_id` is in the set. Sorted, without duplicates.
    SchoolIn { school_ids: Vec<SchoolId> },
    /// Rows in any school of the parent's linked children, resolved by the
    /// data layer at query time.
    ChildSchoolsOf { parent_id: UserId },
    /// No rows.
    Nothing,
}

impl Predicate {
    pub fn label(&self) -> &'static str {
        match self {
            Predicate::Unrestricted => "unrestricted",
            Predicate::SchoolEquals { .. } => "school_equals",
            Predicate::TeacherScoped { .. } => "teacher_scoped",
            Predicate::ParentScoped { .. } => "parent_scoped",
            Predicate::SchoolIn { .. } => "school_in",
            Predicate::ChildSchoolsOf { .. } => "child_schools_of",
            Predicate::Nothing => "nothing",
        }
    }
}

/// Builds the scoping predicate for `identity` over `kind`. Pure.
pub fn build_filter(identity: &Identity, kind: ResourceKind) -> Predicate {
    policy_for(identity.role()).filter(identity, kind)
}

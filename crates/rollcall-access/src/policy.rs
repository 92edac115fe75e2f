//! One access policy per role family.
//!
//! Each policy owns both rules for its roles: the list-time filter and the
//! instance-level decision. Keeping them side by side is what keeps
//! `build_filter` and `can_access` consistent with each other.

use async_trait::async_trait;
use rollcall_auth::AuthError;
use rollcall_models::{ClassId, ClassLink, ResourceId, ResourceKind, Role, StudentId};

use crate::filter::Predicate;
use crate::identity::Identity;
use crate::repository::AccessRepository;
use crate::schools::resolve_parent_schools;

#[async_trait]
pub trait AccessPolicy: Send + Sync {
    fn filter(&self, identity: &Identity, kind: ResourceKind) -> Predicate;

    /// Decides access to one resource. A missing target is `Ok(false)`.
    async fn can_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
        repo: &dyn AccessRepository,
    ) -> Result<bool, AuthError>;
}

pub struct SuperAdminPolicy;
pub struct SchoolStaffPolicy;
pub struct TeacherPolicy;
pub struct ParentPolicy;

pub fn policy_for(role: Role) -> &'static dyn AccessPolicy {
    match role {
        Role::SuperAdmin => &SuperAdminPolicy,
        Role::SchoolAdmin | Role::Principal => &SchoolStaffPolicy,
        Role::Teacher => &TeacherPolicy,
        Role::Parent => &ParentPolicy,
    }
}

fn school_filter(identity: &Identity) -> Predicate {
    match identity.school_id() {
        Some(school_id) => Predicate::SchoolEquals { school_id },
        None => Predicate::Nothing,
    }
}

async fn same_school(
    identity: &Identity,
    kind: ResourceKind,
    id: ResourceId,
    repo: &dyn AccessRepository,
) -> Result<bool, AuthError> {
    let Some(own_school) = identity.school_id() else {
        return Ok(false);
    };
    let target_school = repo.resource_school(kind, id).await?;
    Ok(target_school == Some(own_school))
}

#[async_trait]
impl AccessPolicy for SuperAdminPolicy {
    fn filter(&self, _identity: &Identity, _kind: ResourceKind) -> Predicate {
        Predicate::Unrestricted
    }

    async fn can_access(
        &self,
        _identity: &Identity,
        _kind: ResourceKind,
        _id: ResourceId,
        _repo: &dyn AccessRepository,
    ) -> Result<bool, AuthError> {
        Ok(true)
    }
}

#[async_trait]
impl AccessPolicy for SchoolStaffPolicy {
    fn filter(&self, identity: &Identity, _kind: ResourceKind) -> Predicate {
        school_filter(identity)
    }

    async fn can_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
        repo: &dyn AccessRepository,
    ) -> Result<bool, AuthError> {
        same_school(identity, kind, id, repo).await
    }
}

#[async_trait]
impl AccessPolicy for TeacherPolicy {
    fn filter(&self, identity: &Identity, kind: ResourceKind) -> Predicate {
        if identity.school_id().is_none() {
            return Predicate::Nothing;
        }
        match kind.class_link() {
            ClassLink::SchoolWide => school_filter(identity),
            ClassLink::Itself | ClassLink::Member => Predicate::TeacherScoped {
                teacher_id: identity.subject_id(),
            },
        }
    }

    async fn can_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
        repo: &dyn AccessRepository,
    ) -> Result<bool, AuthError> {
        if identity.school_id().is_none() {
            return Ok(false);
        }

        let class_id = match kind.class_link() {
            ClassLink::SchoolWide => return same_school(identity, kind, id, repo).await,
            ClassLink::Itself => Some(ClassId::from_uuid(id.into_inner())),
            ClassLink::Member => repo.resource_class(kind, id).await?,
        };
        let Some(class_id) = class_id else {
            return Ok(false);
        };

        let relations = repo.class_relations(class_id).await?;
        Ok(relations.is_some_and(|rel| rel.involves_teacher(identity.subject_id())))
    }
}

#[async_trait]
impl AccessPolicy for ParentPolicy {
    fn filter(&self, identity: &Identity, kind: ResourceKind) -> Predicate {
        let parent_id = identity.subject_id();
        if kind.is_student_specific() {
            return Predicate::ParentScoped { parent_id };
        }
        match identity.tenant_school_ids() {
            Some(schools) => Predicate::SchoolIn {
                school_ids: schools.iter().copied().collect(),
            },
            None => Predicate::ChildSchoolsOf { parent_id },
        }
    }

    async fn can_access(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: ResourceId,
        repo: &dyn AccessRepository,
    ) -> Result<bool, AuthError> {
        let parent_id = identity.subject_id();
        if kind.is_student_specific() {
            let student_id = StudentId::from_uuid(id.into_inner());
            return Ok(repo.is_linked_parent(student_id, parent_id).await?);
        }

        let Some(target_school) = repo.resource_school(kind, id).await? else {
            return Ok(false);
        };
        match identity.tenant_school_ids() {
            Some(schools) => Ok(schools.contains(&target_school)),
            None => Ok(resolve_parent_schools(parent_id, repo)
                .await?
                .contains(&target_school)),
        }
    }
}

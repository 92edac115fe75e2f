//! Data-store seams consumed by the engine.
//!
//! [`AccessRepository`] answers the relation questions the policies ask;
//! [`ResourceStore`] is the collaborator data layer that applies a
//! [`Predicate`] to actual rows. Both are implemented by the in-memory store
//! in [`crate::memory`] and by the Postgres store in `rollcall-db`.

use async_trait::async_trait;
use rollcall_auth::AuthError;
use rollcall_models::{
    ClassId, ClassRelations, ListQuery, ResourceId, ResourceKind, ResourceSummary, Role, SchoolId,
    StaffProfile, StudentId, UserId,
};
use thiserror::Error;

use crate::filter::Predicate;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(Box::new(err))
    }
}

#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// The staff profile backing `(user_id, role)`, if any.
    async fn staff_profile(&self, user_id: UserId, role: Role) -> StoreResult<Option<StaffProfile>>;

    async fn parent_profile_exists(&self, user_id: UserId) -> StoreResult<bool>;

    async fn resource_school(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<SchoolId>>;

    /// The class a resource hangs off. For [`ResourceKind::Class`] this is the
    /// class itself; school-wide kinds and unassigned students yield `None`.
    async fn resource_class(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ClassId>>;

    async fn class_relations(&self, class_id: ClassId) -> StoreResult<Option<ClassRelations>>;

    /// Whether any link (primary or additional) ties `parent_id` to the student.
    async fn is_linked_parent(
        &self,
        student_id: StudentId,
        parent_id: UserId,
    ) -> StoreResult<bool>;

    /// Schools of every student linked to the parent. May contain duplicates.
    async fn parent_school_ids(&self, parent_id: UserId) -> StoreResult<Vec<SchoolId>>;
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn list_scoped(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
        query: &ListQuery,
    ) -> StoreResult<Vec<ResourceSummary>>;

    async fn find(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ResourceSummary>>;
}

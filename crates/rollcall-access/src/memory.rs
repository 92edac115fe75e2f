//! In-memory implementation of the access and resource stores.
//!
//! State lives in maps guarded by `tokio::sync::RwLock`. It backs tests and
//! local runs without a database; nothing is durable. [`Predicate`]s are
//! evaluated here with the same semantics the SQL compiler in `rollcall-db`
//! gives them, including failing closed for predicates that do not apply to
//! a kind.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use rollcall_models::{
    ClassId, ClassLink, ClassRelations, LinkKind, ListQuery, ParentLink, ResourceId, ResourceKind,
    ResourceSummary, Role, SchoolId, StaffProfile, StudentId, UserId,
};
use tokio::sync::RwLock;

use crate::filter::Predicate;
use crate::repository::{AccessRepository, ResourceStore, StoreResult};

#[derive(Debug, Default)]
struct State {
    staff: HashMap<(UserId, Role), StaffProfile>,
    parents: HashSet<UserId>,
    resources: HashMap<ResourceId, ResourceSummary>,
    supervisors: HashMap<ClassId, UserId>,
    /// Lesson id to teacher id.
    lesson_teachers: HashMap<ResourceId, UserId>,
    links: Vec<ParentLink>,
}

impl State {
    fn get(&self, kind: ResourceKind, id: ResourceId) -> Option<&ResourceSummary> {
        self.resources.get(&id).filter(|r| r.kind == kind)
    }

    fn class_relations(&self, class_id: ClassId) -> Option<ClassRelations> {
        let class = self.get(ResourceKind::Class, class_id.into())?;
        let lesson_teacher_ids = self
            .resources
            .values()
            .filter(|r| r.kind == ResourceKind::Lesson && r.class_id == Some(class_id))
            .filter_map(|lesson| self.lesson_teachers.get(&lesson.id).copied())
            .collect();

        Some(ClassRelations {
            class_id,
            school_id: class.school_id,
            supervisor_id: self.supervisors.get(&class_id).copied(),
            lesson_teacher_ids,
        })
    }

    fn teaches_class(&self, class_id: ClassId, teacher_id: UserId) -> bool {
        self.class_relations(class_id)
            .is_some_and(|rel| rel.involves_teacher(teacher_id))
    }

    fn is_linked(&self, student_id: StudentId, parent_id: UserId) -> bool {
        self.links
            .iter()
            .any(|link| link.student_id == student_id && link.parent_id == parent_id)
    }

    fn parent_school_ids(&self, parent_id: UserId) -> Vec<SchoolId> {
        self.links
            .iter()
            .filter(|link| link.parent_id == parent_id)
            .filter_map(|link| self.get(ResourceKind::Student, link.student_id.into()))
            .map(|student| student.school_id)
            .collect()
    }

    fn matches(&self, predicate: &Predicate, row: &ResourceSummary) -> bool {
        match predicate {
            Predicate::Unrestricted => true,
            Predicate::SchoolEquals { school_id } => row.school_id == *school_id,
            Predicate::TeacherScoped { teacher_id } => match row.kind.class_link() {
                ClassLink::Itself => {
                    self.teaches_class(ClassId::from_uuid(row.id.into_inner()), *teacher_id)
                }
                ClassLink::Member => row
                    .class_id
                    .is_some_and(|class_id| self.teaches_class(class_id, *teacher_id)),
                ClassLink::SchoolWide => false,
            },
            Predicate::ParentScoped { parent_id } => {
                row.kind.is_student_specific()
                    && self.is_linked(StudentId::from_uuid(row.id.into_inner()), *parent_id)
            }
            Predicate::SchoolIn { school_ids } => school_ids.contains(&row.school_id),
            Predicate::ChildSchoolsOf { parent_id } => {
                self.parent_school_ids(*parent_id).contains(&row.school_id)
            }
            Predicate::Nothing => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_staff(&self, user_id: UserId, role: Role, school_id: SchoolId) {
        self.state
            .write()
            .await
            .staff
            .insert((user_id, role), StaffProfile { user_id, school_id });
    }

    pub async fn add_parent(&self, user_id: UserId) {
        self.state.write().await.parents.insert(user_id);
    }

    pub async fn add_class(
        &self,
        school_id: SchoolId,
        supervisor_id: Option<UserId>,
        label: &str,
    ) -> ClassId {
        let class_id = ClassId::new();
        let mut state = self.state.write().await;
        if let Some(supervisor_id) = supervisor_id {
            state.supervisors.insert(class_id, supervisor_id);
        }
        state.resources.insert(
            class_id.into(),
            ResourceSummary {
                id: class_id.into(),
                kind: ResourceKind::Class,
                school_id,
                class_id: Some(class_id),
                label: label.to_string(),
            },
        );
        class_id
    }

    pub async fn add_lesson(
        &self,
        school_id: SchoolId,
        class_id: ClassId,
        teacher_id: UserId,
        label: &str,
    ) -> ResourceId {
        let id = self
            .add_resource(ResourceKind::Lesson, school_id, Some(class_id), label)
            .await;
        self.state.write().await.lesson_teachers.insert(id, teacher_id);
        id
    }

    pub async fn add_student(
        &self,
        school_id: SchoolId,
        class_id: Option<ClassId>,
        label: &str,
    ) -> StudentId {
        let id = self
            .add_resource(ResourceKind::Student, school_id, class_id, label)
            .await;
        StudentId::from_uuid(id.into_inner())
    }

    pub async fn link_parent(&self, student_id: StudentId, parent_id: UserId, kind: LinkKind) {
        self.state.write().await.links.push(ParentLink {
            student_id,
            parent_id,
            kind,
        });
    }

    /// Adds a row of any kind. Prefer the dedicated helpers for classes,
    /// lessons and students so their relations are recorded too.
    pub async fn add_resource(
        &self,
        kind: ResourceKind,
        school_id: SchoolId,
        class_id: Option<ClassId>,
        label: &str,
    ) -> ResourceId {
        let id = ResourceId::new();
        self.state.write().await.resources.insert(
            id,
            ResourceSummary {
                id,
                kind,
                school_id,
                class_id,
                label: label.to_string(),
            },
        );
        id
    }
}

#[async_trait]
impl AccessRepository for InMemoryStore {
    async fn staff_profile(
        &self,
        user_id: UserId,
        role: Role,
    ) -> StoreResult<Option<StaffProfile>> {
        Ok(self.state.read().await.staff.get(&(user_id, role)).copied())
    }

    async fn parent_profile_exists(&self, user_id: UserId) -> StoreResult<bool> {
        Ok(self.state.read().await.parents.contains(&user_id))
    }

    async fn resource_school(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<SchoolId>> {
        Ok(self.state.read().await.get(kind, id).map(|r| r.school_id))
    }

    async fn resource_class(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ClassId>> {
        let state = self.state.read().await;
        let Some(row) = state.get(kind, id) else {
            return Ok(None);
        };
        Ok(match kind.class_link() {
            ClassLink::Itself => Some(ClassId::from_uuid(row.id.into_inner())),
            ClassLink::Member => row.class_id,
            ClassLink::SchoolWide => None,
        })
    }

    async fn class_relations(&self, class_id: ClassId) -> StoreResult<Option<ClassRelations>> {
        Ok(self.state.read().await.class_relations(class_id))
    }

    async fn is_linked_parent(
        &self,
        student_id: StudentId,
        parent_id: UserId,
    ) -> StoreResult<bool> {
        Ok(self.state.read().await.is_linked(student_id, parent_id))
    }

    async fn parent_school_ids(&self, parent_id: UserId) -> StoreResult<Vec<SchoolId>> {
        Ok(self.state.read().await.parent_school_ids(parent_id))
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list_scoped(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
        query: &ListQuery,
    ) -> StoreResult<Vec<ResourceSummary>> {
        let state = self.state.read().await;
        let needle = query.search.as_deref().map(str::to_lowercase);

        let mut rows: Vec<ResourceSummary> = state
            .resources
            .values()
            .filter(|row| row.kind == kind)
            .filter(|row| {
                needle
                    .as_deref()
                    .is_none_or(|n| row.label.to_lowercase().contains(n))
            })
            .filter(|row| state.matches(predicate, row))
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        Ok(rows
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn find(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ResourceSummary>> {
        Ok(self.state.read().await.get(kind, id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn list(
        store: &InMemoryStore,
        kind: ResourceKind,
        predicate: Predicate,
    ) -> Vec<ResourceSummary> {
        store
            .list_scoped(kind, &predicate, &ListQuery::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_teacher_scoped_covers_supervised_and_taught_classes() {
        let store = InMemoryStore::new();
        let school = SchoolId::new();
        let teacher = UserId::new();

        let supervised = store.add_class(school, Some(teacher), "A").await;
        let taught = store.add_class(school, None, "B").await;
        store.add_lesson(school, taught, teacher, "Physics").await;
        store.add_class(school, Some(UserId::new()), "C").await;

        let scope = Predicate::TeacherScoped {
            teacher_id: teacher,
        };
        let classes = list(&store, ResourceKind::Class, scope.clone()).await;
        let ids: HashSet<ResourceId> = classes.iter().map(|c| c.id).collect();
        assert_eq!(ids, HashSet::from([ResourceId::from(supervised), ResourceId::from(taught)]));

        let assignment = store
            .add_resource(ResourceKind::Assignment, school, Some(taught), "Homework")
            .await;
        let assignments = list(&store, ResourceKind::Assignment, scope).await;
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].id, assignment);
    }

    #[tokio::test]
    async fn test_inapplicable_predicates_fail_closed() {
        let store = InMemoryStore::new();
        let school = SchoolId::new();
        let parent = UserId::new();
        let class_id = store.add_class(school, Some(parent), "A").await;
        store
            .add_resource(ResourceKind::Event, school, Some(class_id), "Concert")
            .await;

        for predicate in [
            Predicate::ParentScoped { parent_id: parent },
            Predicate::TeacherScoped { teacher_id: parent },
            Predicate::Nothing,
        ] {
            assert!(list(&store, ResourceKind::Event, predicate).await.is_empty());
        }
        let all = list(&store, ResourceKind::Event, Predicate::Unrestricted).await;
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_school_equals_isolates_tenants() {
        let store = InMemoryStore::new();
        let (a, b) = (SchoolId::new(), SchoolId::new());
        store.add_student(a, None, "In A").await;
        store.add_student(b, None, "In B").await;

        let scope = Predicate::SchoolEquals { school_id: a };
        let rows = list(&store, ResourceKind::Student, scope).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].school_id, a);
    }

    #[tokio::test]
    async fn test_search_and_paging() {
        let store = InMemoryStore::new();
        let school = SchoolId::new();
        for label in ["Ada", "Adele", "Bob", "adam"] {
            store.add_student(school, None, label).await;
        }

        let query = ListQuery::page(2, 0).with_search("ad");
        let first = store
            .list_scoped(ResourceKind::Student, &Predicate::Unrestricted, &query)
            .await
            .unwrap();
        let labels: Vec<_> = first.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Ada", "Adele"]);

        let query = ListQuery::page(2, 2).with_search("ad");
        let second = store
            .list_scoped(ResourceKind::Student, &Predicate::Unrestricted, &query)
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].label, "adam");
    }

    #[tokio::test]
    async fn test_find_checks_kind() {
        let store = InMemoryStore::new();
        let student = store.add_student(SchoolId::new(), None, "Ada").await;
        assert!(store.find(ResourceKind::Student, student.into()).await.unwrap().is_some());
        assert!(store.find(ResourceKind::Class, student.into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_class_relations_collect_lesson_teachers() {
        let store = InMemoryStore::new();
        let school = SchoolId::new();
        let supervisor = UserId::new();
        let (t1, t2) = (UserId::new(), UserId::new());
        let class_id = store.add_class(school, Some(supervisor), "A").await;
        store.add_lesson(school, class_id, t1, "Math").await;
        store.add_lesson(school, class_id, t2, "Art").await;

        let relations = store.class_relations(class_id).await.unwrap().unwrap();
        assert_eq!(relations.school_id, school);
        assert_eq!(relations.supervisor_id, Some(supervisor));
        assert_eq!(relations.lesson_teacher_ids.len(), 2);
        assert!(relations.involves_teacher(t2));
    }
}

//! Postgres-backed access repository and resource store.
//!
//! All queries are checked at runtime. Table and column names come from
//! [`crate::schema`]; user input only ever reaches the database as a bound
//! parameter.

use async_trait::async_trait;
use rollcall_access::{AccessRepository, Predicate, ResourceStore, StoreError, StoreResult};
use rollcall_models::{
    ClassId, ClassLink, ClassRelations, ListQuery, ResourceId, ResourceKind, ResourceSummary, Role,
    SchoolId, StaffProfile, StudentId, UserId,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::schema::{label_expr, summary_class_expr, table};
use crate::scope::push_scope;

#[derive(Clone)]
pub struct PgAccessRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct DbClass {
    id: ClassId,
    school_id: SchoolId,
    supervisor_id: Option<UserId>,
}

#[derive(Debug, FromRow)]
struct DbResource {
    id: ResourceId,
    school_id: SchoolId,
    class_id: Option<ClassId>,
    label: String,
}

impl DbResource {
    fn into_summary(self, kind: ResourceKind) -> ResourceSummary {
        ResourceSummary {
            id: self.id,
            kind,
            school_id: self.school_id,
            class_id: self.class_id,
            label: self.label,
        }
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Unexpected(err.into())
}

/// Escapes `LIKE` wildcards so a search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn select_summary(kind: ResourceKind) -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!(
        "SELECT r.id, r.school_id, {class} AS class_id, {label} AS label FROM {table} r WHERE ",
        class = summary_class_expr(kind),
        label = label_expr(kind),
        table = table(kind),
    ))
}

impl PgAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessRepository for PgAccessRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn staff_profile(
        &self,
        user_id: UserId,
        role: Role,
    ) -> StoreResult<Option<StaffProfile>> {
        sqlx::query_as::<_, StaffProfile>(
            "SELECT user_id, school_id FROM staff_profiles WHERE user_id = $1 AND role = $2",
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn parent_profile_exists(&self, user_id: UserId) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM parent_profiles WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn resource_school(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<SchoolId>> {
        let sql = format!("SELECT school_id FROM {} WHERE id = $1", table(kind));
        sqlx::query_scalar::<_, SchoolId>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn resource_class(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ClassId>> {
        let column = match kind.class_link() {
            ClassLink::Itself => "id",
            ClassLink::Member => "class_id",
            ClassLink::SchoolWide => return Ok(None),
        };
        let sql = format!("SELECT {column} FROM {} WHERE id = $1", table(kind));
        let class_id = sqlx::query_scalar::<_, Option<ClassId>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(class_id.flatten())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn class_relations(&self, class_id: ClassId) -> StoreResult<Option<ClassRelations>> {
        let class = sqlx::query_as::<_, DbClass>(
            "SELECT id, school_id, supervisor_id FROM classes WHERE id = $1",
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        let Some(class) = class else {
            return Ok(None);
        };

        let lesson_teacher_ids = sqlx::query_scalar::<_, UserId>(
            "SELECT DISTINCT teacher_id FROM lessons WHERE class_id = $1",
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(Some(ClassRelations {
            class_id: class.id,
            school_id: class.school_id,
            supervisor_id: class.supervisor_id,
            lesson_teacher_ids,
        }))
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn is_linked_parent(
        &self,
        student_id: StudentId,
        parent_id: UserId,
    ) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM parent_links WHERE student_id = $1 AND parent_id = $2)",
        )
        .bind(student_id)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn parent_school_ids(&self, parent_id: UserId) -> StoreResult<Vec<SchoolId>> {
        sqlx::query_scalar::<_, SchoolId>(
            "SELECT DISTINCT st.school_id FROM parent_links pl \
             JOIN students st ON st.id = pl.student_id \
             WHERE pl.parent_id = $1",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}

#[async_trait]
impl ResourceStore for PgAccessRepository {
    #[tracing::instrument(skip(self, query), fields(scope = predicate.label()))]
    async fn list_scoped(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
        query: &ListQuery,
    ) -> StoreResult<Vec<ResourceSummary>> {
        let mut builder = select_summary(kind);
        push_scope(&mut builder, kind, predicate);

        if let Some(term) = query.search.as_deref() {
            builder.push(" AND ");
            builder.push(label_expr(kind));
            builder.push(" ILIKE ");
            builder.push_bind(like_pattern(term));
        }

        builder.push(" ORDER BY label, r.id LIMIT ");
        builder.push_bind(query.limit);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset);

        let rows = builder
            .build_query_as::<DbResource>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(|row| row.into_summary(kind)).collect())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn find(
        &self,
        kind: ResourceKind,
        id: ResourceId,
    ) -> StoreResult<Option<ResourceSummary>> {
        let mut builder = select_summary(kind);
        builder.push("r.id = ");
        builder.push_bind(id);

        let row = builder
            .build_query_as::<DbResource>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(|row| row.into_summary(kind)))
    }
}

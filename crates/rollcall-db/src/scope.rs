//! Compiles scoping predicates into SQL.
//!
//! [`push_scope`] appends one parenthesized boolean expression over the row
//! alias `r`, binding every value as a parameter. A predicate that does not
//! apply to the kind compiles to `FALSE`.

use rollcall_access::Predicate;
use rollcall_models::ResourceKind;
use sqlx::{Postgres, QueryBuilder};

use crate::schema::scope_class_column;

pub fn push_scope(
    builder: &mut QueryBuilder<'_, Postgres>,
    kind: ResourceKind,
    predicate: &Predicate,
) {
    match predicate {
        Predicate::Unrestricted => {
            builder.push("TRUE");
        }
        Predicate::SchoolEquals { school_id } => {
            builder.push("(r.school_id = ");
            builder.push_bind(*school_id);
            builder.push(")");
        }
        Predicate::TeacherScoped { teacher_id } => match scope_class_column(kind) {
            Some(column) => {
                builder.push("(");
                builder.push(column);
                builder.push(" IN (SELECT c.id FROM classes c WHERE c.supervisor_id = ");
                builder.push_bind(*teacher_id);
                builder.push(
                    " OR EXISTS (SELECT 1 FROM lessons l WHERE l.class_id = c.id AND l.teacher_id = ",
                );
                builder.push_bind(*teacher_id);
                builder.push(")))");
            }
            None => {
                builder.push("FALSE");
            }
        },
        Predicate::ParentScoped { parent_id } => {
            if kind.is_student_specific() {
                builder.push(
                    "(EXISTS (SELECT 1 FROM parent_links pl WHERE pl.student_id = r.id AND pl.parent_id = ",
                );
                builder.push_bind(*parent_id);
                builder.push("))");
            } else {
                builder.push("FALSE");
            }
        }
        Predicate::SchoolIn { school_ids } => {
            if school_ids.is_empty() {
                builder.push("FALSE");
            } else {
                builder.push("(r.school_id = ANY(");
                builder.push_bind(school_ids.clone());
                builder.push("))");
            }
        }
        Predicate::ChildSchoolsOf { parent_id } => {
            builder.push(
                "(r.school_id IN (SELECT st.school_id FROM parent_links pl \
                 JOIN students st ON st.id = pl.student_id WHERE pl.parent_id = ",
            );
            builder.push_bind(*parent_id);
            builder.push("))");
        }
        Predicate::Nothing => {
            builder.push("FALSE");
        }
    }
}

//! Profile and relation records read by the access engine.
//!
//! These are read-only projections; the engine never writes them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{ClassId, SchoolId, StudentId, UserId};

/// A staff profile (school admin, principal or teacher) binding a user to
/// exactly one school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StaffProfile {
    pub user_id: UserId,
    pub school_id: SchoolId,
}

/// The relations that decide whether a teacher can see a class: its
/// supervisor and everyone teaching a lesson in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRelations {
    pub class_id: ClassId,
    pub school_id: SchoolId,
    pub supervisor_id: Option<UserId>,
    pub lesson_teacher_ids: Vec<UserId>,
}

impl ClassRelations {
    pub fn involves_teacher(&self, teacher_id: UserId) -> bool {
        self.supervisor_id == Some(teacher_id) || self.lesson_teacher_ids.contains(&teacher_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// The parent shown by default on the student record.
    Primary,
    Guardian,
    Other,
}

/// One parent-to-student relationship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub student_id: StudentId,
    pub parent_id: UserId,
    pub kind: LinkKind,
}

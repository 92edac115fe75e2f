//! Resource kinds guarded by the access engine and the summaries the data
//! layer returns for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::ids::{ClassId, ResourceId, SchoolId};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Student,
    Class,
    Lesson,
    Subject,
    Assignment,
    Event,
    Announcement,
}

/// How a resource kind reaches a class, which decides teacher visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLink {
    /// The resource is the class.
    Itself,
    /// The resource row carries a `class_id`.
    Member,
    /// School-wide resource with no class relation.
    SchoolWide,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Student,
        ResourceKind::Class,
        ResourceKind::Lesson,
        ResourceKind::Subject,
        ResourceKind::Assignment,
        ResourceKind::Event,
        ResourceKind::Announcement,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Student => "student",
            ResourceKind::Class => "class",
            ResourceKind::Lesson => "lesson",
            ResourceKind::Subject => "subject",
            ResourceKind::Assignment => "assignment",
            ResourceKind::Event => "event",
            ResourceKind::Announcement => "announcement",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            ResourceKind::Student => "students",
            ResourceKind::Class => "classes",
            ResourceKind::Lesson => "lessons",
            ResourceKind::Subject => "subjects",
            ResourceKind::Assignment => "assignments",
            ResourceKind::Event => "events",
            ResourceKind::Announcement => "announcements",
        }
    }

    pub const fn class_link(self) -> ClassLink {
        match self {
            ResourceKind::Class => ClassLink::Itself,
            ResourceKind::Student | ResourceKind::Lesson | ResourceKind::Assignment => {
                ClassLink::Member
            }
            ResourceKind::Subject | ResourceKind::Event | ResourceKind::Announcement => {
                ClassLink::SchoolWide
            }
        }
    }

    /// Records about one specific child. Parents only ever see their own
    /// children's rows of these kinds; everything else is school-wide for them.
    pub const fn is_student_specific(self) -> bool {
        matches!(self, ResourceKind::Student)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResourceKind(pub String);

impl fmt::Display for UnknownResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource kind: {}", self.0)
    }
}

impl std::error::Error for UnknownResourceKind {}

/// Accepts both the singular and the plural form (`student`, `students`).
impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered || kind.plural() == lowered)
            .ok_or_else(|| UnknownResourceKind(s.to_string()))
    }
}

/// Storage-agnostic view of one resource row, enough for scoping and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceSummary {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub school_id: SchoolId,
    pub class_id: Option<ClassId>,
    pub label: String,
}

/// Paging and optional label search for scoped listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: i64,
    pub offset: i64,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

//! Table layout per resource kind.
//!
//! Every name returned here is a compile-time constant. Dynamic SQL in this
//! crate only ever interpolates these. Queries alias the resource table as `r`.

use rollcall_models::{ClassLink, ResourceKind};

pub const fn table(kind: ResourceKind) -> &'static str {
    kind.plural()
}

/// SQL expression producing the display label.
pub const fn label_expr(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Student => "(r.first_name || ' ' || r.last_name)",
        ResourceKind::Class | ResourceKind::Subject => "r.name",
        ResourceKind::Lesson
        | ResourceKind::Assignment
        | ResourceKind::Event
        | ResourceKind::Announcement => "r.title",
    }
}

/// Class column shown in summaries. Events and announcements may be tagged
/// with a class without being scoped by it.
pub const fn summary_class_expr(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Class => "r.id",
        ResourceKind::Subject => "NULL::uuid",
        ResourceKind::Student
        | ResourceKind::Lesson
        | ResourceKind::Assignment
        | ResourceKind::Event
        | ResourceKind::Announcement => "r.class_id",
    }
}

/// Class column that teacher scoping narrows on, if the kind has one.
pub const fn scope_class_column(kind: ResourceKind) -> Option<&'static str> {
    match kind.class_link() {
        ClassLink::Itself => Some("r.id"),
        ClassLink::Member => Some("r.class_id"),
        ClassLink::SchoolWide => None,
    }
}

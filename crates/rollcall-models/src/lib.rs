//! # Rollcall Models
//!
//! Shared vocabulary for the access engine and its collaborators.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed UUID newtypes
//! - [`roles`]: the closed [`Role`] enum
//! - [`resources`]: [`ResourceKind`], resource summaries and list queries
//! - [`relations`]: staff profiles, class relations and parent links

pub mod ids;
pub mod relations;
pub mod resources;
pub mod roles;

pub use ids::{ClassId, ResourceId, SchoolId, StudentId, UserId};
pub use relations::{ClassRelations, LinkKind, ParentLink, StaffProfile};
pub use resources::{ClassLink, ListQuery, ResourceKind, ResourceSummary};
pub use roles::Role;

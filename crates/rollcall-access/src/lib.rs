//! # Rollcall Access
//!
//! The authorization and tenant-isolation engine.
//!
//! A request flows through three steps before any resource is read:
//!
//! 1. credential verification (`rollcall-auth`)
//! 2. the [`role_gate`], a pure check of the role claim
//! 3. the identity [`resolver`], which attaches the caller's tenancy from
//!    their profile
//!
//! Controllers then either scope a query with [`build_filter`] or check a
//! single resource with [`AccessEngine::can_access`]. Per-role rules live in
//! [`policy`]; data access goes through the traits in [`repository`].

pub mod engine;
pub mod filter;
pub mod identity;
pub mod memory;
pub mod policy;
pub mod repository;
pub mod resolver;
pub mod role_gate;
pub mod schools;
pub mod validator;

pub use engine::AccessEngine;
pub use filter::{Predicate, build_filter};
pub use identity::Identity;
pub use memory::InMemoryStore;
pub use policy::{AccessPolicy, policy_for};
pub use repository::{AccessRepository, ResourceStore, StoreError, StoreResult};
pub use resolver::resolve_identity_context;
pub use role_gate::{ALL_ROLES, OperationConfig, SUPER_ADMIN_ONLY, check_role};
pub use schools::resolve_parent_schools;

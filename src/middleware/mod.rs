//! Request authorization.
//!
//! - [`auth`]: per-operation extractors yielding a resolved
//!   [`Identity`](rollcall_access::Identity)
//! - [`role`]: route-layer role gates
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The token is verified (401 on failure)
//! 3. The role is checked against the operation (403 on failure)
//! 4. The identity is resolved from the caller's profile (403 if missing)
//! 5. The handler scopes its query or checks the target resource (404 when
//!    out of scope)
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CanViewResources;
//!
//! async fn list(CanViewResources(identity): CanViewResources) -> impl IntoResponse {
//!     // identity.role(), identity.school_id(), ...
//! }
//! ```

pub mod auth;
pub mod role;

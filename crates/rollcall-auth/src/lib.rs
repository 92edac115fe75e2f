//! # Rollcall Auth
//!
//! Credential verification for the Rollcall API.
//!
//! - [`claims`]: raw JWT claims and the verified claim set
//! - [`jwt`]: token minting and verification
//! - [`bearer`]: `Authorization` header parsing
//! - [`error`]: the [`AuthError`] taxonomy shared by every authorization step

pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwt;

pub use bearer::bearer_token;
pub use claims::{Claims, VerifiedClaims};
pub use error::{AuthError, BoxError};
pub use jwt::{create_access_token, decode_claims, verify_token};

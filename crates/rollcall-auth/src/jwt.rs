//! HS256 token minting and verification.
//!
//! Verification is the only place a bearer credential is trusted. Everything
//! downstream works with [`VerifiedClaims`], whose subject is already a
//! [`UserId`] and whose role is already a member of the closed [`Role`] enum.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{create_access_token, verify_token};
//! use rollcall_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Role::Teacher, Some(school_id), &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use rollcall_config::JwtConfig;
use rollcall_core::AppError;
use rollcall_models::{Role, SchoolId, UserId};

use crate::claims::{Claims, VerifiedClaims};
use crate::error::AuthError;

const INVALID_TOKEN: &str = "Invalid or expired token";

/// Mints an access token for `subject_id` acting as `role`.
///
/// `school_id` is written as an advisory claim only; verification never turns
/// it into a tenant.
pub fn create_access_token(
    subject_id: UserId,
    role: Role,
    school_id: Option<SchoolId>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(jwt_config.access_token_expiry).max(0);

    let claims = Claims {
        sub: subject_id.to_string(),
        role,
        school_id: school_id.map(SchoolId::into_inner),
        tenant_id: None,
        exp: exp as usize,
        iat: now.max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Decodes a token without interpreting the subject.
pub fn decode_claims(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::Unauthenticated(INVALID_TOKEN))
}

/// Verifies signature and expiry and narrows the claims.
///
/// Fails with [`AuthError::Unauthenticated`] when the token is malformed,
/// expired, signed with another secret, names an unknown role, or carries a
/// subject that is not a UUID.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<VerifiedClaims, AuthError> {
    let claims = decode_claims(token, jwt_config)?;

    let subject_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| AuthError::Unauthenticated(INVALID_TOKEN))?;

    Ok(VerifiedClaims {
        subject_id,
        role: claims.role,
        advisory_school_id: claims.school_id.or(claims.tenant_id).map(SchoolId::from),
    })
}

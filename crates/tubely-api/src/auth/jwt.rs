//! HS256 access tokens.
//!
//! Tokens carry the user id as `sub` and are bound to a fixed issuer. Validation checks
//! signature, issuer and expiry; anything else about the caller comes from the metadata
//! store.

use crate::auth::models::JwtClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tubely_core::constants::JWT_ISSUER;
use tubely_core::AppError;
use uuid::Uuid;

/// Mint a token for `user_id` that expires after `ttl`.
pub fn issue_token(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        iss: JWT_ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify `token` and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<JwtClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[JWT_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::ExpiredSignature => "Token has expired",
            ErrorKind::InvalidIssuer => "Invalid token issuer",
            ErrorKind::InvalidSignature => "Invalid token signature",
            _ => "Invalid token",
        };
        tracing::debug!(error = %e, reason, "Token validation failed");
        AppError::Unauthorized(reason.to_string())
    })?;

    Ok(data.claims)
}

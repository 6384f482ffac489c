//! JWT (JSON Web Token) utilities for authentication.
//!
//! Tokens are HS256-signed with the server-held secret from [`JwtConfig`] and
//! expire `JwtConfig::token_expiry` seconds after issuance (7 days by default).
//! Verification checks both the signature and the expiration.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use ridegate_config::JwtConfig;
use ridegate_core::AppError;

use crate::claims::Claims;

/// Message for every token verification failure.
pub const INVALID_TOKEN: &str = "Token is not valid";

/// Issues a bearer token bound to `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Verifies a bearer token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN))
}

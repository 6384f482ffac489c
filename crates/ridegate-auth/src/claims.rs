use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use ridegate_core::AppError;

/// JWT claims for bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The subject as a UUID. A non-UUID subject is treated as an invalid token.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized(crate::jwt::INVALID_TOKEN))
    }
}

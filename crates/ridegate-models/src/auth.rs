use ridegate_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{User, UserSummary};

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// The role the caller claims to hold; must match the stored role.
    pub role: Role,
}

/// Returned by registration: the created user and a bearer token.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Returned by login.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoginPayload {
    pub user: UserSummary,
    pub token: String,
}

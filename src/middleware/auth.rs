use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use ridegate_auth::{INVALID_TOKEN, verify_token};
use ridegate_core::AppError;
use ridegate_core::permissions::{Permission, Role, has_permission};
use ridegate_db::{Lookup, Scope};
use ridegate_models::User;
use tracing::debug;

use crate::state::AppState;

pub const NO_TOKEN: &str = "No token provided";

/// The authenticated caller, resolved from storage on every request.
///
/// Inserted into request extensions by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(self.0.role, permission)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN))
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies the bearer token and re-resolves the user it names.
///
/// The user must still be live and `active`, so deactivating or deleting an
/// account revokes its outstanding tokens immediately.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req).ok_or_else(|| AppError::unauthorized(NO_TOKEN))?;
    let claims = verify_token(token, &state.jwt_config)?;
    let user_id = claims.user_id()?;

    let user = state
        .users
        .find_one(&Lookup::Id(user_id), Scope::Live)
        .await?
        .filter(|user| user.can_authenticate())
        .ok_or_else(|| {
            debug!(%user_id, "Token names a missing or inactive user");
            AppError::unauthorized(INVALID_TOKEN)
        })?;

    req.extensions_mut().insert(AuthUser(user.to_public()));
    Ok(next.run(req).await)
}

//! Role and permission gates.
//!
//! Both gates run after [`authenticate`](crate::middleware::auth::authenticate)
//! and read the [`AuthUser`] it stored. A request that reaches a gate without
//! one is rejected with 401; an authenticated caller without the required role
//! or permission gets 403 "Insufficient permissions".
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::post};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/user/admin", post(create_user))
//!     .route_layer(middleware::from_fn(require_admin));
//! ```

use axum::{extract::Request, middleware::Next, response::Response};
use ridegate_core::AppError;
use ridegate_core::permissions::{Permission, Role, has_any_permission, is_role_allowed};
use tracing::warn;

use crate::middleware::auth::{AuthUser, NO_TOKEN};

fn auth_user(req: &Request) -> Result<&AuthUser, AppError> {
    req.extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized(NO_TOKEN))
}

pub fn check_any_role(user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if is_role_allowed(user.role(), allowed_roles) {
        return Ok(());
    }
    warn!(user_id = %user.0.id, role = %user.role(), "Role gate rejected request");
    Err(AppError::insufficient_permissions())
}

pub fn check_any_permission(user: &AuthUser, permissions: &[Permission]) -> Result<(), AppError> {
    if has_any_permission(user.role(), permissions) {
        return Ok(());
    }
    warn!(user_id = %user.0.id, role = %user.role(), "Permission gate rejected request");
    Err(AppError::insufficient_permissions())
}

/// Passes only callers whose role is one of `allowed_roles`.
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    check_any_role(auth_user(&req)?, allowed_roles)?;
    Ok(next.run(req).await)
}

/// Passes only callers whose role holds at least one of `permissions`.
pub async fn require_permissions(
    req: Request,
    next: Next,
    permissions: &[Permission],
) -> Result<Response, AppError> {
    check_any_permission(auth_user(&req)?, permissions)?;
    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(req, next, &[Role::Admin]).await
}

pub async fn require_write_users(req: Request, next: Next) -> Result<Response, AppError> {
    require_permissions(req, next, &[Permission::WriteUsers]).await
}

pub async fn require_delete_users(req: Request, next: Next) -> Result<Response, AppError> {
    require_permissions(req, next, &[Permission::DeleteUsers]).await
}

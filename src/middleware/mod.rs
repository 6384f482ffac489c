//! Request middleware.
//!
//! - [`rate_limit`]: global per-IP quota, ahead of every route
//! - [`auth`]: bearer token verification and the [`auth::AuthUser`] extractor
//! - [`role`]: role and permission gates layered after authentication
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::authenticate`] verifies the token and loads the live, active user
//! 3. A gate from [`role`] checks the user's role or permissions
//! 4. The handler runs with the caller available as [`auth::AuthUser`]

pub mod auth;
pub mod rate_limit;
pub mod role;

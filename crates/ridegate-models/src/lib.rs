//! # Ridegate Models
//!
//! Domain models and DTOs for the Ridegate API.
//!
//! - [`users`]: the stored user record, its public projection, status and metadata,
//!   and the create/update payloads
//! - [`auth`]: login payload and the `{user, token}` response bodies
//!
//! The stored record ([`UserRecord`]) is the only type that carries the password
//! hash. Everything that leaves the service layer is converted to [`User`] or
//! [`UserSummary`] first, neither of which has a password field.

pub mod auth;
pub mod users;

pub use auth::{AuthPayload, LoginDto, LoginPayload};
pub use users::{
    CreateUserDto, Metadata, Status, UpdateUserDto, User, UserRecord, UserSummary,
};

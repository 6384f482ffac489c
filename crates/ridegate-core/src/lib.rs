//! # Ridegate Core
//!
//! Core types, errors, and utilities for the Ridegate API.
//!
//! This crate provides foundational types used throughout the Ridegate application:
//!
//! - [`errors`]: Application error union with HTTP response conversion
//! - [`response`]: The `{success, message, data, error}` response envelope
//! - [`pagination`]: Pagination metadata for list responses
//! - [`permissions`]: Role to permission mapping and permission checks
//! - [`query`]: Field projection, `filter_*` parameters, sorting and list parameters
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use ridegate_core::permissions::{Permission, Role, has_permission};
//! use ridegate_core::query::Projection;
//!
//! assert!(has_permission(Role::Admin, Permission::DeleteUsers));
//!
//! let projection = Projection::parse(Some("firstName,metadata.phone"));
//! let shaped = projection.apply(&user_json);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod query;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::PaginationMeta;
pub use password::{hash_password, verify_password};
pub use permissions::{Permission, Role};
pub use response::{ApiResponse, PaginatedResponse};

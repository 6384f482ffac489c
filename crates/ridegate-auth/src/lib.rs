//! # Ridegate Auth
//!
//! Bearer token support for the Ridegate API.
//!
//! - [`claims`]: the JWT claim set
//! - [`jwt`]: token issuance and verification
//!
//! Tokens carry only the user id. Role and status are re-read from storage on
//! every request, so deactivating or deleting an account takes effect at once.
//!
//! # Example
//!
//! ```ignore
//! use ridegate_auth::{create_token, verify_token};
//! use ridegate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{INVALID_TOKEN, create_token, verify_token};

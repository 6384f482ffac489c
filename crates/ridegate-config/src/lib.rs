//! # Ridegate Config
//!
//! Configuration types for the Ridegate API.
//!
//! Every structure is loaded from environment variables once at startup, with a
//! default for each value, and then passed explicitly to whatever needs it:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: global per-IP request quota
//! - [`password`]: bcrypt work factor
//! - [`server`]: listener address
//! - [`logging`]: log level and log file directory
//!
//! # Example
//!
//! ```ignore
//! use ridegate_config::{CorsConfig, JwtConfig, RateLimitConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use password::PasswordConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Reads `key` and parses it, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

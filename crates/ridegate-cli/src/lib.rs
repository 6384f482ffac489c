//! # Ridegate CLI
//!
//! Administrative utilities behind the `ridegate-cli` binary.
//!
//! - [`admin`]: provisioning admin accounts, which cannot self-register over HTTP
//! - [`seeder`]: bulk fake users for testing and development
//!
//! Both work through [`ridegate_db::UserRepository`], so they apply the same
//! uniqueness rules as the API.
//!
//! ## Usage
//!
//! ```ignore
//! use ridegate_cli::seeder::{SeedConfig, seed_users};
//!
//! let config = SeedConfig::new(50);
//! let created = seed_users(&repository, &config, &password_config).await?;
//! ```

pub mod admin;
pub mod seeder;

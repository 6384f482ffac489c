//! # Ridegate DB
//!
//! User persistence for the Ridegate API.
//!
//! Services talk to storage only through the [`UserRepository`] trait
//! (find / count / find_one / create / update). Two implementations exist:
//!
//! - [`PgUserRepository`]: PostgreSQL via SQLx, queries assembled with `QueryBuilder`
//! - [`MemoryUserRepository`]: a process-local store with the same semantics,
//!   used by the integration tests and by `DATABASE_URL=memory://`
//!
//! [`fields`] maps API field paths (`firstName`, `metadata.phone`, ...) onto
//! both backends so that filtering and sorting behave identically.
//!
//! # Example
//!
//! ```ignore
//! use ridegate_db::{PgUserRepository, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod fields;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::{Lookup, Scope, USER_ALREADY_EXISTS, UserQuery, UserRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

/// URL scheme that selects the in-memory repository.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Connects a PostgreSQL pool.
///
/// Call once during startup; the returned pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

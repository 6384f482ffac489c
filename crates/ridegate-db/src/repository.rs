use async_trait::async_trait;
use ridegate_core::AppError;
use ridegate_core::query::{Filters, SortKey};
use ridegate_models::UserRecord;
use uuid::Uuid;

/// Conflict message for a duplicate email, live or soft-deleted.
pub const USER_ALREADY_EXISTS: &str = "User already exists";

/// Predicate for list and count. Soft-deleted users are always excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Case-insensitive substring matched against first, last and middle name and email.
    pub search: Option<String>,
    /// Equality filters, combined with AND.
    pub filters: Filters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(Uuid),
    Email(String),
}

/// Whether a single-record lookup may return soft-deleted users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Live,
    All,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of live users matching `query`, ordered by `sort` then `id`.
    async fn find(
        &self,
        query: &UserQuery,
        sort: &[SortKey],
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserRecord>, AppError>;

    /// Number of live users matching `query`, ignoring pagination.
    async fn count(&self, query: &UserQuery) -> Result<i64, AppError>;

    async fn find_one(&self, lookup: &Lookup, scope: Scope)
    -> Result<Option<UserRecord>, AppError>;

    /// Inserts `record`. A duplicate email is a `BadRequest` with [`USER_ALREADY_EXISTS`].
    async fn create(&self, record: UserRecord) -> Result<UserRecord, AppError>;

    /// Overwrites the live user with `record.id`. Returns `None` when no live
    /// user has that id.
    async fn update(&self, record: UserRecord) -> Result<Option<UserRecord>, AppError>;
}

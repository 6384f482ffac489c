//! Process-local user repository.
//!
//! Mirrors [`PgUserRepository`](crate::PgUserRepository) semantics: the same
//! field mapping, live-only listing, NULLS LAST ordering with an `id` tiebreak,
//! and a global unique email.

use std::cmp::Ordering;

use async_trait::async_trait;
use ridegate_core::AppError;
use ridegate_core::query::{SortDirection, SortKey};
use ridegate_models::UserRecord;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::fields::{SortValue, UserField};
use crate::repository::{Lookup, Scope, USER_ALREADY_EXISTS, UserQuery, UserRepository};

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, soft-deleted ones included.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn matches(user: &UserRecord, query: &UserQuery) -> bool {
    if !user.is_live() {
        return false;
    }

    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let hit = [
            Some(&user.first_name),
            Some(&user.last_name),
            user.middle_name.as_ref(),
            Some(&user.email),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&needle));

        if !hit {
            return false;
        }
    }

    query.filters.iter().all(|(path, expected)| {
        UserField::from_path(path)
            .filter(UserField::is_filterable)
            .and_then(|field| field.text_value(user))
            .is_some_and(|actual| actual == expected)
    })
}

fn compare_values(a: Option<SortValue>, b: Option<SortValue>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &UserRecord, b: &UserRecord, sort: &[SortKey]) -> Ordering {
    sort.iter()
        .filter_map(|key| {
            UserField::from_path(&key.field)
                .filter(UserField::is_sortable)
                .map(|field| (field, key.direction))
        })
        .map(|(field, direction)| {
            compare_values(field.sort_value(a), field.sort_value(b), direction)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

fn lookup_matches(user: &UserRecord, lookup: &Lookup) -> bool {
    match lookup {
        Lookup::Id(id) => user.id == *id,
        Lookup::Email(email) => user.email == *email,
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        query: &UserQuery,
        sort: &[SortKey],
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserRecord>, AppError> {
        let users = self.users.read().await;
        let mut hits: Vec<&UserRecord> = users.iter().filter(|u| matches(u, query)).collect();
        hits.sort_by(|a, b| compare(a, b, sort));

        Ok(hits
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &UserQuery) -> Result<i64, AppError> {
        let users = self.users.read().await;
        let total = users.iter().filter(|u| matches(u, query)).count();
        Ok(i64::try_from(total).unwrap_or(i64::MAX))
    }

    #[instrument(skip(self))]
    async fn find_one(
        &self,
        lookup: &Lookup,
        scope: Scope,
    ) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| scope == Scope::All || u.is_live())
            .find(|u| lookup_matches(u, lookup))
            .cloned())
    }

    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn create(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == record.email) {
            return Err(AppError::bad_request(USER_ALREADY_EXISTS));
        }
        users.push(record.clone());
        Ok(record)
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn update(&self, record: UserRecord) -> Result<Option<UserRecord>, AppError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id != record.id && u.email == record.email)
        {
            return Err(AppError::bad_request(USER_ALREADY_EXISTS));
        }

        let Some(slot) = users.iter_mut().find(|u| u.id == record.id && u.is_live()) else {
            return Ok(None);
        };

        let mut stored = record;
        stored.created_at = slot.created_at;
        *slot = stored.clone();
        Ok(Some(stored))
    }
}

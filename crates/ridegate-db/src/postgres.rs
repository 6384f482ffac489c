//! PostgreSQL user repository.
//!
//! List and lookup queries are assembled with [`QueryBuilder`] so that every
//! user-supplied value is a bind parameter; only column expressions from
//! [`UserField`] are pushed as SQL text.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ridegate_core::AppError;
use ridegate_core::query::SortKey;
use ridegate_models::{Metadata, UserRecord};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::fields::{SEARCH_COLUMNS, UserField, escape_like};
use crate::repository::{Lookup, Scope, USER_ALREADY_EXISTS, UserQuery, UserRepository};

const USER_COLUMNS: &str = "id, first_name, last_name, middle_name, email, password, role, \
                            status, avatar, metadata, is_deleted, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
    email: String,
    password: String,
    role: String,
    status: String,
    avatar: Option<String>,
    metadata: Option<Json<Metadata>>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            middle_name: row.middle_name,
            email: row.email,
            password: row.password,
            role: row
                .role
                .parse()
                .map_err(|e| AppError::internal(anyhow!("corrupt user row {}: {e}", row.id)))?,
            status: row
                .status
                .parse()
                .map_err(|e| AppError::internal(anyhow!("corrupt user row {}: {e}", row.id)))?,
            avatar: row.avatar,
            metadata: row.metadata.map(|Json(m)| m),
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends `WHERE` for live users matching `query`.
pub(crate) fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &UserQuery) {
    builder.push(" WHERE is_deleted = FALSE");

    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        builder.push(")");
    }

    for (field, value) in query.filters.iter() {
        match UserField::from_path(field).filter(UserField::is_filterable) {
            Some(field) => {
                builder
                    .push(" AND ")
                    .push(field.filter_sql())
                    .push(" = ")
                    .push_bind(value.to_string());
            }
            None => {
                builder.push(" AND FALSE");
            }
        }
    }
}

/// Appends `ORDER BY`, skipping unknown fields and ending with `id` as a tiebreak.
pub(crate) fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: &[SortKey]) {
    builder.push(" ORDER BY ");
    for key in sort {
        if let Some(field) = UserField::from_path(&key.field).filter(UserField::is_sortable) {
            builder
                .push(field.sort_sql())
                .push(" ")
                .push(key.direction.as_sql())
                .push(" NULLS LAST, ");
        }
    }
    builder.push("id ASC");
}

fn map_write_error(err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        AppError::bad_request(USER_ALREADY_EXISTS)
    } else {
        err.into()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        query: &UserQuery,
        sort: &[SortKey],
        skip: i64,
        limit: i64,
    ) -> Result<Vec<UserRecord>, AppError> {
        let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_conditions(&mut builder, query);
        push_order(&mut builder, sort);
        builder
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &UserQuery) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_conditions(&mut builder, query);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn find_one(
        &self,
        lookup: &Lookup,
        scope: Scope,
    ) -> Result<Option<UserRecord>, AppError> {
        let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE "));
        match lookup {
            Lookup::Id(id) => builder.push("id = ").push_bind(*id),
            Lookup::Email(email) => builder.push("email = ").push_bind(email.clone()),
        };
        if scope == Scope::Live {
            builder.push(" AND is_deleted = FALSE");
        }
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn create(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(record.id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.middle_name)
        .bind(&record.email)
        .bind(&record.password)
        .bind(record.role.as_str())
        .bind(record.status.as_str())
        .bind(&record.avatar)
        .bind(record.metadata.as_ref().map(Json))
        .bind(record.is_deleted)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        UserRecord::try_from(row)
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn update(&self, record: UserRecord) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET first_name = $2, last_name = $3, middle_name = $4, email = $5, \
             password = $6, role = $7, status = $8, avatar = $9, metadata = $10, \
             is_deleted = $11, updated_at = $12 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(record.id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.middle_name)
        .bind(&record.email)
        .bind(&record.password)
        .bind(record.role.as_str())
        .bind(record.status.as_str())
        .bind(&record.avatar)
        .bind(record.metadata.as_ref().map(Json))
        .bind(record.is_deleted)
        .bind(record.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(UserRecord::try_from).transpose()
    }
}

//! API field paths mapped onto storage.
//!
//! Both repositories resolve `filter_*` and `sort` field names through
//! [`UserField::from_path`]. A path that does not resolve, or resolves to a field
//! that is not filterable, matches nothing. `password` never resolves.

use chrono::{DateTime, Utc};
use ridegate_models::UserRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    FirstName,
    LastName,
    MiddleName,
    Email,
    Role,
    Status,
    Avatar,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
    MetadataAddress,
    MetadataPhone,
    MetadataAge,
    MetadataGender,
}

/// Comparable value of a field for in-memory sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Number(i64),
    Time(DateTime<Utc>),
    Uuid(Uuid),
}

/// Columns searched by the free-text `query` parameter.
pub const SEARCH_COLUMNS: [&str; 4] = ["first_name", "last_name", "middle_name", "email"];

impl UserField {
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let field = match path {
            "id" => Self::Id,
            "firstName" => Self::FirstName,
            "lastName" => Self::LastName,
            "middleName" => Self::MiddleName,
            "email" => Self::Email,
            "role" => Self::Role,
            "status" => Self::Status,
            "avatar" => Self::Avatar,
            "isDeleted" => Self::IsDeleted,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            "metadata.address" => Self::MetadataAddress,
            "metadata.phone" => Self::MetadataPhone,
            "metadata.age" => Self::MetadataAge,
            "metadata.gender" => Self::MetadataGender,
            _ => return None,
        };
        Some(field)
    }

    /// Timestamps have no stable text form across backends, so they only sort.
    #[must_use]
    pub fn is_filterable(&self) -> bool {
        !matches!(self, Self::CreatedAt | Self::UpdatedAt)
    }

    #[must_use]
    pub fn is_sortable(&self) -> bool {
        !matches!(self, Self::IsDeleted)
    }

    /// SQL expression yielding the field as text, for equality filters.
    #[must_use]
    pub fn filter_sql(&self) -> &'static str {
        match self {
            Self::Id => "id::text",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::MiddleName => "middle_name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Status => "status",
            Self::Avatar => "avatar",
            Self::IsDeleted => "is_deleted::text",
            Self::CreatedAt => "created_at::text",
            Self::UpdatedAt => "updated_at::text",
            Self::MetadataAddress => "metadata->>'address'",
            Self::MetadataPhone => "metadata->>'phone'",
            Self::MetadataAge => "metadata->>'age'",
            Self::MetadataGender => "metadata->>'gender'",
        }
    }

    /// SQL expression used in `ORDER BY`.
    #[must_use]
    pub fn sort_sql(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::MetadataAge => "(metadata->>'age')::int",
            other => other.filter_sql(),
        }
    }

    /// The field's text form, matching what [`Self::filter_sql`] yields in Postgres.
    #[must_use]
    pub fn text_value(&self, user: &UserRecord) -> Option<String> {
        let metadata = user.metadata.as_ref();
        match self {
            Self::Id => Some(user.id.to_string()),
            Self::FirstName => Some(user.first_name.clone()),
            Self::LastName => Some(user.last_name.clone()),
            Self::MiddleName => user.middle_name.clone(),
            Self::Email => Some(user.email.clone()),
            Self::Role => Some(user.role.as_str().to_string()),
            Self::Status => Some(user.status.as_str().to_string()),
            Self::Avatar => user.avatar.clone(),
            Self::IsDeleted => Some(user.is_deleted.to_string()),
            Self::CreatedAt | Self::UpdatedAt => None,
            Self::MetadataAddress => metadata.and_then(|m| m.address.clone()),
            Self::MetadataPhone => metadata.and_then(|m| m.phone.clone()),
            Self::MetadataAge => metadata.and_then(|m| m.age).map(|age| age.to_string()),
            Self::MetadataGender => metadata.and_then(|m| m.gender.clone()),
        }
    }

    #[must_use]
    pub fn sort_value(&self, user: &UserRecord) -> Option<SortValue> {
        match self {
            Self::Id => Some(SortValue::Uuid(user.id)),
            Self::CreatedAt => Some(SortValue::Time(user.created_at)),
            Self::UpdatedAt => Some(SortValue::Time(user.updated_at)),
            Self::MetadataAge => user
                .metadata
                .as_ref()
                .and_then(|m| m.age)
                .map(|age| SortValue::Number(i64::from(age))),
            other => other.text_value(user).map(SortValue::Text),
        }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `LIKE`.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

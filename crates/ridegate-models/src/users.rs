//! User domain models and DTOs.
//!
//! This module contains all data structures related to user management:
//! the stored record, the public user representation, and request payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use ridegate_core::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Account status. Only `active` users may authenticate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
    Banned,
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Banned => "banned",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            "banned" => Ok(Status::Banned),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Optional profile details. Every sub-field is independently optional and
/// independently updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 150, message = "metadata.age must be between 0 and 150"))]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Metadata {
    /// Overwrites each sub-field present in `patch`; absent sub-fields are kept.
    pub fn merge(&mut self, patch: Metadata) {
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.age.is_some() {
            self.age = patch.age;
        }
        if patch.gender.is_some() {
            self.gender = patch.gender;
        }
    }
}

/// A user as stored, including the password hash.
///
/// Never serialized; convert with [`UserRecord::to_public`] or
/// [`UserRecord::summary`] before anything leaves the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: Status,
    pub avatar: Option<String>,
    pub metadata: Option<Metadata>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Not soft-deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Live and active: the only state in which a user may hold a session.
    #[must_use]
    pub fn can_authenticate(&self) -> bool {
        self.is_live() && self.status == Status::Active
    }

    #[must_use]
    pub fn to_public(&self) -> User {
        User {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name: self.middle_name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            avatar: self.avatar.clone(),
            metadata: self.metadata.clone(),
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name: self.middle_name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// A user as returned by the API. Has no password field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal user view returned on login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Payload for self-registration and admin creation.
///
/// `role` defaults to `passenger` and `status` to `active`.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    pub middle_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: Option<Role>,
    pub status: Option<Status>,
    #[validate(url(message = "avatar must be a valid URL"))]
    pub avatar: Option<String>,
    #[validate(nested)]
    pub metadata: Option<Metadata>,
}

impl CreateUserDto {
    /// Builds the record to persist, with defaults applied and the password
    /// replaced by `password_hash`.
    #[must_use]
    pub fn into_record(self, password_hash: String, now: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            email: self.email,
            password: password_hash,
            role: self.role.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            avatar: self.avatar,
            metadata: self.metadata,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Omitted fields are left untouched, never cleared.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
    #[validate(url(message = "avatar must be a valid URL"))]
    pub avatar: Option<String>,
    #[validate(nested)]
    pub metadata: Option<Metadata>,
}

impl UpdateUserDto {
    /// Applies every provided field except `password` to `record`.
    ///
    /// The password must be hashed by the caller and stored separately.
    pub fn apply_to(self, record: &mut UserRecord) {
        if let Some(first_name) = self.first_name {
            record.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            record.last_name = last_name;
        }
        if let Some(middle_name) = self.middle_name {
            record.middle_name = Some(middle_name);
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(role) = self.role {
            record.role = role;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(avatar) = self.avatar {
            record.avatar = Some(avatar);
        }
        if let Some(patch) = self.metadata {
            record.metadata.get_or_insert_with(Metadata::default).merge(patch);
        }
    }
}

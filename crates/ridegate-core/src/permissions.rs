//! Role and permission model for the Ridegate API.
//!
//! Every user carries exactly one [`Role`]. Each role maps to a fixed set of
//! [`Permission`]s; [`Permission::AdminAll`] is a wildcard that satisfies any
//! check. All functions here are pure.
//!
//! | Role        | Permissions                                       |
//! |-------------|---------------------------------------------------|
//! | `admin`     | `read:users`, `write:users`, `delete:users`, `admin:all` |
//! | `driver`    | `read:users`                                      |
//! | `passenger` | `read:users`                                      |
//!
//! # Example
//!
//! ```ignore
//! use ridegate_core::permissions::{Permission, Role, has_permission, is_role_allowed};
//!
//! assert!(has_permission(Role::Admin, Permission::WriteUsers));
//! assert!(!has_permission(Role::Driver, Permission::WriteUsers));
//! assert!(is_role_allowed(Role::Driver, &[Role::Admin, Role::Driver]));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Driver,
    #[default]
    Passenger,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Driver, Role::Passenger];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Driver => "driver",
            Role::Passenger => "passenger",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "driver" => Ok(Role::Driver),
            "passenger" => Ok(Role::Passenger),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Permission {
    #[serde(rename = "read:users")]
    ReadUsers,
    #[serde(rename = "write:users")]
    WriteUsers,
    #[serde(rename = "delete:users")]
    DeleteUsers,
    #[serde(rename = "admin:all")]
    AdminAll,
}

impl Permission {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadUsers => "read:users",
            Permission::WriteUsers => "write:users",
            Permission::DeleteUsers => "delete:users",
            Permission::AdminAll => "admin:all",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ReadUsers,
    Permission::WriteUsers,
    Permission::DeleteUsers,
    Permission::AdminAll,
];
const DRIVER_PERMISSIONS: &[Permission] = &[Permission::ReadUsers];
const PASSENGER_PERMISSIONS: &[Permission] = &[Permission::ReadUsers];

/// The permission set granted to `role`.
#[must_use]
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Driver => DRIVER_PERMISSIONS,
        Role::Passenger => PASSENGER_PERMISSIONS,
    }
}

/// The permission set for a stored role name. Unknown names get the empty set.
#[must_use]
pub fn permissions_for_name(role: &str) -> &'static [Permission] {
    role.parse().map(permissions_for).unwrap_or(&[])
}

fn grants(granted: &[Permission], permission: Permission) -> bool {
    granted.contains(&Permission::AdminAll) || granted.contains(&permission)
}

#[must_use]
pub fn has_permission(role: Role, permission: Permission) -> bool {
    grants(permissions_for(role), permission)
}

/// Name-keyed variant of [`has_permission`]; an unknown role fails every check.
#[must_use]
pub fn role_name_has_permission(role: &str, permission: Permission) -> bool {
    grants(permissions_for_name(role), permission)
}

#[must_use]
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

#[must_use]
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Plain membership test, independent of the permission table.
#[must_use]
pub fn is_role_allowed(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Access role of a staff member inside a tenant.
///
/// Anything outside the four known names parses to `Unrecognized` instead of
/// failing, so callers can fall back to the most restrictive behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Doctor,
    Admin,
    Owner,
    Unrecognized,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "user" => Role::User,
            "doctor" => Role::Doctor,
            "admin" => Role::Admin,
            "owner" => Role::Owner,
            _ => Role::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Unrecognized => "unrecognized",
        }
    }

    /// Admins and owners see the financial and management areas.
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }

    /// Roles allowed to browse patient records (plan permitting).
    pub fn sees_patients(&self) -> bool {
        matches!(self, Role::Doctor | Role::Admin | Role::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row in the `users` table. The password hash never leaves the store layer;
/// read endpoints return [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub tenant: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub tenant: String,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            tenant: row.tenant,
            email: row.email,
            name: row.name,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

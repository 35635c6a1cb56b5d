use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Subscription tier of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanTier {
    Starter,
    Plus,
    Unrecognized,
}

impl PlanTier {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "starter" => PlanTier::Starter,
            "plus" => PlanTier::Plus,
            _ => PlanTier::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Plus => "plus",
            PlanTier::Unrecognized => "unrecognized",
        }
    }

    /// Patient records are hidden on the entry tier and on unknown tiers.
    pub fn includes_patients(&self) -> bool {
        matches!(self, PlanTier::Plus)
    }

    pub fn includes_stock(&self) -> bool {
        matches!(self, PlanTier::Plus)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level API segments that cannot double as tenant slugs.
pub const RESERVED_SLUGS: &[&str] = &["auth", "bills", "income"];

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// A tenant identifier as used in URLs: a non-empty slug of lowercase ASCII
/// letters, digits and hyphens, so it can be spliced into a path as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Surrounding whitespace is dropped; anything else outside the slug
    /// alphabet is rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || !has_allowed_slug_chars(trimmed)
            || RESERVED_SLUGS.contains(&trimmed)
        {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TenantId::new(value).ok_or_else(|| "tenant id must be a non-empty slug".to_string())
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TenantRow {
    pub slug: String,
    pub name: String,
    pub plan_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub plan_type: String,
}

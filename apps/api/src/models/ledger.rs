use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const BILL_CATEGORIES: &[&str] = &[
    "Medical Supplies",
    "Pharmaceuticals",
    "Equipment Maintenance",
    "Staff Salaries",
    "Patient Care",
    "Laboratory",
    "Radiology",
    "Emergency Services",
    "Administrative",
    "Facilities Management",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Consultations",
    "Surgical Procedures",
    "Laboratory Tests",
    "Imaging",
    "Pharmacy Sales",
    "Inpatient Services",
    "Emergency Services",
    "Insurance Reimbursements",
    "Government Grants",
    "Donations",
];

/// Which financial collection a ledger entry belongs to.
/// Bills (expenses) and income share one shape and one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    Bill,
    Income,
}

impl LedgerKind {
    /// Value stored in the `kind` column, also the singular noun in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Bill => "bill",
            LedgerKind::Income => "income",
        }
    }

    /// URL segment of the collection, e.g. `/api/bills`.
    pub fn collection(&self) -> &'static str {
        match self {
            LedgerKind::Bill => "bills",
            LedgerKind::Income => "income",
        }
    }

    pub fn plural_noun(&self) -> &'static str {
        match self {
            LedgerKind::Bill => "bills",
            LedgerKind::Income => "income records",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            LedgerKind::Bill => BILL_CATEGORIES,
            LedgerKind::Income => INCOME_CATEGORIES,
        }
    }

    pub fn accepts_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row in the `ledger_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerRow {
    pub id: Uuid,
    pub tenant: String,
    pub kind: String,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bill or income record as exchanged over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<LedgerRow> for LedgerEntry {
    fn from(row: LedgerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            amount: row.amount,
            date: row.date,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated field set for creating or replacing an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerFields {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
}

/// Request body for create. Every field is optional at the wire level so
/// validation can report which one is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerPayload {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub category: Option<String>,
}

/// Request body for `PUT /api/bills`, which carries the id in the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerUpdatePayload {
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub fields: LedgerPayload,
}

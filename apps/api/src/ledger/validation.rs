use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ledger::{LedgerFields, LedgerKind, LedgerPayload};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("Unknown {kind} category '{category}'")]
    UnknownCategory { kind: LedgerKind, category: String },
}

/// Parses a user-typed amount. Only positive, finite numbers are accepted.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, LedgerValidationError> {
    // Accept full timestamps too; only the calendar day is kept.
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| LedgerValidationError::InvalidDate(raw.to_string()))
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, LedgerValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LedgerValidationError::MissingField(field)),
    }
}

/// Validates a create/update body. All four fields are required.
pub fn validate_payload(
    kind: LedgerKind,
    payload: &LedgerPayload,
) -> Result<LedgerFields, LedgerValidationError> {
    let name = required(&payload.name, "name")?;
    let amount = payload
        .amount
        .ok_or(LedgerValidationError::MissingField("amount"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerValidationError::InvalidAmount);
    }
    let date = parse_date(required(&payload.date, "date")?)?;
    let category = required(&payload.category, "category")?;
    if !kind.accepts_category(category) {
        return Err(LedgerValidationError::UnknownCategory {
            kind,
            category: category.to_string(),
        });
    }

    Ok(LedgerFields {
        name: name.to_string(),
        amount,
        date,
        category: category.to_string(),
    })
}

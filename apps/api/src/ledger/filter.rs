use chrono::Datelike;

use crate::models::ledger::LedgerEntry;

/// Client-side view filter. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerFilter {
    /// Calendar month, 1 = January.
    pub month: Option<u32>,
    pub category: Option<String>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let month_match = self.month.map_or(true, |m| entry.date.month() == m);
        let category_match = self
            .category
            .as_deref()
            .map_or(true, |c| entry.category == c);
        month_match && category_match
    }

    pub fn apply<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

pub fn total<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> f64 {
    entries.into_iter().map(|e| e.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn entry(name: &str, amount: f64, date: (i32, u32, u32), category: &str) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category: category.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry("Blood panel reagents", 300.0, (2024, 2, 3), "Laboratory"),
            entry("Centrifuge service", 120.0, (2024, 2, 20), "Equipment Maintenance"),
            entry("Culture media", 80.0, (2024, 3, 1), "Laboratory"),
            entry("Gloves", 150.5, (2024, 1, 10), "Medical Supplies"),
        ]
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let entries = sample();
        let filter = LedgerFilter::default();
        assert_eq!(filter.apply(&entries).len(), 4);
        assert!((total(filter.apply(&entries)) - 650.5).abs() < 1e-9);
    }

    #[test]
    fn test_month_and_category_both_apply() {
        let entries = sample();
        let filter = LedgerFilter {
            month: Some(2),
            category: Some("Laboratory".to_string()),
        };
        let visible = filter.apply(&entries);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Blood panel reagents");
        assert!((total(visible) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_only() {
        let entries = sample();
        let filter = LedgerFilter {
            month: Some(2),
            category: None,
        };
        assert!((total(filter.apply(&entries)) - 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_matches_across_years() {
        let entries = vec![
            entry("a", 1.0, (2023, 2, 1), "Laboratory"),
            entry("b", 2.0, (2024, 2, 1), "Laboratory"),
        ];
        let filter = LedgerFilter {
            month: Some(2),
            category: None,
        };
        assert_eq!(filter.apply(&entries).len(), 2);
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(total(&[] as &[LedgerEntry]), 0.0);
    }
}

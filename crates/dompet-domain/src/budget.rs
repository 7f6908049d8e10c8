//! Budget caps and their derived spending totals.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// A per-category spending cap for one calendar month.
///
/// `spent` is a cached derived value: it is only ever recomputed by
/// summing matching expense transactions, never mutated on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    /// 1-based calendar month.
    pub month: u32,
    pub year: i32,
    /// The cap.
    pub amount: f64,
    pub spent: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn health(&self) -> BudgetHealth {
        BudgetHealth::classify(self.amount, self.spent)
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Presentation classification of a budget's utilization. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetHealth {
    Safe,
    Warning,
    Danger,
}

impl BudgetHealth {
    /// Classifies `spent / amount`: >= 90% is danger, >= 70% warning.
    ///
    /// The ratio is undefined for a non-positive cap, which reads as safe.
    pub fn classify(amount: f64, spent: f64) -> Self {
        if amount <= 0.0 {
            return BudgetHealth::Safe;
        }
        let ratio = spent / amount;
        if ratio >= 0.9 {
            BudgetHealth::Danger
        } else if ratio >= 0.7 {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Safe
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetHealth::Safe => "Safe",
            BudgetHealth::Warning => "Warning",
            BudgetHealth::Danger => "Danger",
        };
        f.write_str(label)
    }
}

/// The month/year the budget tracker is currently focused on.
///
/// Spent totals are only guaranteed fresh for this period; other periods
/// are recomputed lazily once the selection moves and a mutation touches
/// their category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetView {
    pub month: u32,
    pub year: i32,
}

impl BudgetView {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_thresholds() {
        assert_eq!(BudgetHealth::classify(100.0, 0.0), BudgetHealth::Safe);
        assert_eq!(BudgetHealth::classify(100.0, 69.9), BudgetHealth::Safe);
        assert_eq!(BudgetHealth::classify(100.0, 70.0), BudgetHealth::Warning);
        assert_eq!(BudgetHealth::classify(100.0, 89.9), BudgetHealth::Warning);
        assert_eq!(BudgetHealth::classify(100.0, 90.0), BudgetHealth::Danger);
        assert_eq!(BudgetHealth::classify(100.0, 150.0), BudgetHealth::Danger);
    }

    #[test]
    fn non_positive_cap_reads_safe() {
        assert_eq!(BudgetHealth::classify(0.0, 50.0), BudgetHealth::Safe);
        assert_eq!(BudgetHealth::classify(-10.0, 50.0), BudgetHealth::Safe);
    }
}

//! Recurring transaction definitions and cadence arithmetic.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{shift_month, shift_year, Identifiable, NamedEntity};
use crate::transaction::TransactionKind;

/// A template that materializes ledger entries on a fixed cadence.
///
/// `next_run_date` is always the earliest not-yet-materialized occurrence
/// at or after `start_date`; it only ever moves forward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: String,
    pub kind: TransactionKind,
    pub wallet_id: Uuid,
    pub category_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<f64>,
    pub frequency: Frequency,
    /// Cadence multiplier, at least 1.
    pub interval: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub next_run_date: NaiveDate,
    #[serde(default)]
    pub last_run_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringTransaction {
    /// The occurrence following `from` under this definition's cadence.
    pub fn next_occurrence(&self, from: NaiveDate) -> NaiveDate {
        self.frequency.advance(from, self.interval.max(1))
    }

    /// Whether the definition has run out of runway at `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date.map(|end| end < today).unwrap_or(false)
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringTransaction {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Canonical recurrence cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Advances `from` by `interval` periods of this cadence.
    ///
    /// Month and year steps clamp the day to the target month's length.
    pub fn advance(self, from: NaiveDate, interval: u32) -> NaiveDate {
        let interval = interval.max(1);
        match self {
            Frequency::Daily => from + Duration::days(interval as i64),
            Frequency::Weekly => from + Duration::weeks(interval as i64),
            Frequency::Monthly => shift_month(from, interval as i32),
            Frequency::Yearly => shift_year(from, interval as i32),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Outcome of one catch-up pass over the recurring definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringRunReport {
    /// Definitions that materialized at least one occurrence.
    pub processed: usize,
    /// Total ledger entries created.
    pub created: usize,
    pub details: Vec<RecurringRunDetail>,
}

/// Per-definition slice of a [`RecurringRunReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringRunDetail {
    pub recurring_id: Uuid,
    pub name: String,
    pub created: usize,
    pub next_run_date: NaiveDate,
}

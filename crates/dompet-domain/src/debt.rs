//! Debts, receivables, and their derived settlement status.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// Money owed to or by a person, reconciled against ledger payments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub kind: DebtKind,
    pub person_name: String,
    /// Total owed.
    pub amount: f64,
    /// Cumulative payments recorded so far.
    pub paid_amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Derived from (paid_amount, amount, due_date); persisted for display.
    pub status: DebtStatus,
    pub wallet_id: Uuid,
    /// Ledger entries backing this debt, in creation order. Grows only.
    #[serde(default)]
    pub linked_transaction_ids: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    pub fn remaining(&self) -> f64 {
        self.amount - self.paid_amount
    }

    /// Re-derives and stores the status for the given reference date.
    pub fn refresh_status(&mut self, today: NaiveDate) {
        self.status = DebtStatus::derive(self.amount, self.paid_amount, self.due_date, today);
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Direction of the obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebtKind {
    /// Money this user owes someone.
    Debt,
    /// Money someone owes this user.
    Receivable,
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtKind::Debt => "Debt",
            DebtKind::Receivable => "Receivable",
        };
        f.write_str(label)
    }
}

/// Settlement state of a debt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebtStatus {
    Active,
    PartiallyPaid,
    Overdue,
    Settled,
}

impl DebtStatus {
    /// Derives the status. Precedence: Settled, then Overdue, then
    /// PartiallyPaid; a fully paid debt is never overdue.
    pub fn derive(
        amount: f64,
        paid_amount: f64,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        if paid_amount >= amount {
            DebtStatus::Settled
        } else if due_date.map(|due| due < today).unwrap_or(false) {
            DebtStatus::Overdue
        } else if paid_amount > 0.0 {
            DebtStatus::PartiallyPaid
        } else {
            DebtStatus::Active
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtStatus::Active => "Active",
            DebtStatus::PartiallyPaid => "Partially Paid",
            DebtStatus::Overdue => "Overdue",
            DebtStatus::Settled => "Settled",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn settled_wins_over_overdue() {
        let status = DebtStatus::derive(1000.0, 1000.0, Some(date(2020, 1, 1)), date(2025, 8, 1));
        assert_eq!(status, DebtStatus::Settled);
    }

    #[test]
    fn overdue_wins_over_partially_paid() {
        let status = DebtStatus::derive(1000.0, 200.0, Some(date(2020, 1, 1)), date(2025, 8, 1));
        assert_eq!(status, DebtStatus::Overdue);
    }

    #[test]
    fn partial_payment_without_due_date() {
        let status = DebtStatus::derive(1000.0, 200.0, None, date(2025, 8, 1));
        assert_eq!(status, DebtStatus::PartiallyPaid);
    }

    #[test]
    fn untouched_debt_is_active() {
        let status = DebtStatus::derive(1000.0, 0.0, Some(date(2025, 12, 31)), date(2025, 8, 1));
        assert_eq!(status, DebtStatus::Active);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let today = date(2025, 8, 7);
        let status = DebtStatus::derive(1000.0, 0.0, Some(today), today);
        assert_eq!(status, DebtStatus::Active);
    }
}

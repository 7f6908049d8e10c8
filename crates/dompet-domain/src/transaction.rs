//! Domain models for ledger transactions and filter queries.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// A single ledger entry.
///
/// The balance effect of a transaction is reconstructable from its own
/// fields alone (`kind`, `amount`, `wallet_id`, `to_wallet_id`,
/// `to_amount`), which is what makes exact reversal possible without an
/// external log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub wallet_id: Uuid,
    /// Always `None` for transfers.
    pub category_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    /// Destination-side amount, populated only for cross-currency transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Destination-side amount moved by a transfer.
    ///
    /// Same-currency transfers carry `amount` over unchanged.
    pub fn transfer_in_amount(&self) -> f64 {
        self.to_amount.unwrap_or(self.amount)
    }

    /// Returns `true` when this entry is an expense booked against `category_id`.
    pub fn is_expense_in(&self, category_id: Uuid) -> bool {
        self.kind == TransactionKind::Expense && self.category_id == Some(category_id)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Supported transaction types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

/// Query value for derived transaction reads.
///
/// Filtering and sorting happen at read time; the filter itself is never
/// persisted with the books.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub wallet_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring match over the description.
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Clears every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when the transaction satisfies every set criterion.
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(wallet_id) = self.wallet_id {
            if txn.wallet_id != wallet_id && txn.to_wallet_id != Some(wallet_id) {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if txn.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date > to {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() {
                let haystack = txn
                    .description
                    .as_deref()
                    .map(str::to_lowercase)
                    .unwrap_or_default();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_when_absent() {
        let raw = r#"{
            "id": "5f4d9bcd-1f21-4d6b-9d63-2f2f5e4b8a10",
            "amount": 30000.0,
            "currency": "IDR",
            "kind": "Expense",
            "date": "2025-08-05",
            "wallet_id": "0b6ed5d2-74a2-4ad6-94bb-0d29c3a7d5a1",
            "category_id": null,
            "to_wallet_id": null,
            "created_at": "2025-08-05T03:00:00Z",
            "updated_at": "2025-08-05T03:00:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(raw).expect("parse stored entry");
        assert_eq!(txn.to_amount, None);
        assert_eq!(txn.to_currency, None);
        assert_eq!(txn.description, None);
        assert_eq!(txn.transfer_in_amount(), 30_000.0);
    }

    #[test]
    fn filter_narrows_by_kind_and_range() {
        let raw = r#"{
            "id": "5f4d9bcd-1f21-4d6b-9d63-2f2f5e4b8a10",
            "amount": 10.0,
            "currency": "USD",
            "kind": "Income",
            "date": "2025-08-05",
            "wallet_id": "0b6ed5d2-74a2-4ad6-94bb-0d29c3a7d5a1",
            "category_id": null,
            "to_wallet_id": null,
            "description": "Freelance invoice",
            "created_at": "2025-08-05T03:00:00Z",
            "updated_at": "2025-08-05T03:00:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(raw).expect("parse stored entry");

        let mut filter = TransactionFilter {
            kind: Some(TransactionKind::Income),
            from: Some(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()),
            search: Some("invoice".into()),
            ..TransactionFilter::default()
        };
        assert!(filter.matches(&txn));

        filter.kind = Some(TransactionKind::Expense);
        assert!(!filter.matches(&txn));

        filter.reset();
        assert_eq!(filter, TransactionFilter::default());
        assert!(filter.matches(&txn));
    }
}

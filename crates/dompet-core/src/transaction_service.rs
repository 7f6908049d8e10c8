//! The transaction ledger: the single serialization point for every
//! balance mutation in the system.

use chrono::NaiveDate;
use uuid::Uuid;

use dompet_domain::{Books, Transaction, TransactionFilter, TransactionKind};

use crate::budget_service::BudgetService;
use crate::currency;
use crate::time::Clock;

/// Caller-facing input for creating or replacing a ledger entry.
///
/// The source currency and transfer fields are resolved from the books at
/// apply time and frozen onto the stored transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub wallet_id: Uuid,
    pub category_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    /// Destination amount for cross-currency transfers, user-declared.
    pub to_amount: Option<f64>,
    pub description: Option<String>,
}

/// CRUD over ledger entries, with paired balance effects and budget
/// recalculation on every mutation.
pub struct TransactionService;

impl TransactionService {
    /// Records a new entry and returns the stored transaction, so callers
    /// (debts, shopping lists, recurring definitions) can link to its id.
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewTransaction) -> Transaction {
        let now = clock.now();
        let txn = Self::build(books, &input, Uuid::new_v4(), now, now);
        currency::apply_effect(books, &txn);
        let stored = txn.clone();
        books.add_transaction(txn);
        Self::recalculate_if_expense(books, stored.kind, stored.category_id);
        stored
    }

    /// Replaces an entry in place. Unknown ids are a silent no-op.
    ///
    /// The old effect is reversed using the old entry's frozen fields
    /// before the new effect is applied, and budgets are recalculated for
    /// both the old and the new category since the amount may have moved.
    pub fn update(books: &mut Books, clock: &dyn Clock, id: Uuid, input: NewTransaction) {
        let Some(old) = books.transaction(id).cloned() else {
            return;
        };
        currency::reverse_effect(books, &old);
        let replacement = Self::build(books, &input, old.id, old.created_at, clock.now());
        currency::apply_effect(books, &replacement);
        let new_kind = replacement.kind;
        let new_category = replacement.category_id;
        if let Some(slot) = books.transaction_mut(id) {
            *slot = replacement;
        }
        books.touch();
        Self::recalculate_if_expense(books, old.kind, old.category_id);
        Self::recalculate_if_expense(books, new_kind, new_category);
    }

    /// Deletes an entry, reversing its balance effect. No-op when missing.
    pub fn remove(books: &mut Books, id: Uuid) {
        let Some(removed) = books.remove_transaction(id) else {
            return;
        };
        currency::reverse_effect(books, &removed);
        Self::recalculate_if_expense(books, removed.kind, removed.category_id);
    }

    /// Derived read: entries matching `filter`, newest date first.
    pub fn filtered<'a>(books: &'a Books, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        let mut rows: Vec<&Transaction> = books
            .transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        rows
    }

    fn build(
        books: &Books,
        input: &NewTransaction,
        id: Uuid,
        created_at: chrono::DateTime<chrono::Utc>,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Transaction {
        let currency_code = books
            .wallet_currency(input.wallet_id)
            .unwrap_or_default()
            .to_string();
        let is_transfer = input.kind == TransactionKind::Transfer;
        let transfer = currency::resolve_transfer_fields(
            books,
            input.kind,
            input.wallet_id,
            input.to_wallet_id,
            input.to_amount,
        );
        Transaction {
            id,
            amount: input.amount,
            currency: currency_code,
            kind: input.kind,
            date: input.date,
            wallet_id: input.wallet_id,
            // Transfers never carry a category.
            category_id: if is_transfer { None } else { input.category_id },
            to_wallet_id: if is_transfer { input.to_wallet_id } else { None },
            to_amount: transfer.to_amount,
            to_currency: transfer.to_currency,
            description: input.description.clone(),
            created_at,
            updated_at,
        }
    }

    fn recalculate_if_expense(
        books: &mut Books,
        kind: TransactionKind,
        category_id: Option<Uuid>,
    ) {
        if kind == TransactionKind::Expense {
            if let Some(category_id) = category_id {
                BudgetService::recalculate_spent(books, category_id);
            }
        }
    }
}

//! Currency resolution and the balance effect of a transaction.
//!
//! These are the only functions that touch wallet balances. Apply and
//! reverse are exact algebraic inverses over the same frozen transaction
//! fields, which is the invariant that makes deletion and editing safe
//! without an external undo log.

use dompet_domain::{Books, Transaction, TransactionKind};
use uuid::Uuid;

/// Destination-side fields of a transfer, as stored on the transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFields {
    pub to_currency: Option<String>,
    /// Present only when source and destination currencies differ.
    pub to_amount: Option<f64>,
}

/// Resolves the destination currency and amount for a transfer input.
///
/// Non-transfer inputs resolve to nothing. Same-currency transfers carry
/// the source amount over unchanged, so `to_amount` stays `None`. For
/// cross-currency transfers the caller-supplied destination amount is
/// trusted as-is; no rate arithmetic happens here.
pub fn resolve_transfer_fields(
    books: &Books,
    kind: TransactionKind,
    wallet_id: Uuid,
    to_wallet_id: Option<Uuid>,
    requested_to_amount: Option<f64>,
) -> TransferFields {
    if kind != TransactionKind::Transfer {
        return TransferFields::default();
    }
    let Some(to_wallet_id) = to_wallet_id else {
        return TransferFields::default();
    };
    let (Some(source), Some(dest)) = (
        books.wallet_currency(wallet_id),
        books.wallet_currency(to_wallet_id),
    ) else {
        return TransferFields::default();
    };
    if source == dest {
        TransferFields {
            to_currency: Some(dest.to_string()),
            to_amount: None,
        }
    } else {
        TransferFields {
            to_currency: Some(dest.to_string()),
            to_amount: requested_to_amount,
        }
    }
}

/// Applies the transaction's effect to the involved wallet balances.
pub fn apply_effect(books: &mut Books, txn: &Transaction) {
    match txn.kind {
        TransactionKind::Income => books.adjust_balance(txn.wallet_id, txn.amount),
        TransactionKind::Expense => books.adjust_balance(txn.wallet_id, -txn.amount),
        TransactionKind::Transfer => {
            books.adjust_balance(txn.wallet_id, -txn.amount);
            if let Some(to_wallet_id) = txn.to_wallet_id {
                books.adjust_balance(to_wallet_id, txn.transfer_in_amount());
            }
        }
    }
}

/// Undoes [`apply_effect`] for the same transaction.
///
/// Reversal always uses the transaction's own frozen fields, never the
/// wallet's current state, so `reverse(apply(balances)) == balances`
/// holds regardless of what happened in between.
pub fn reverse_effect(books: &mut Books, txn: &Transaction) {
    match txn.kind {
        TransactionKind::Income => books.adjust_balance(txn.wallet_id, -txn.amount),
        TransactionKind::Expense => books.adjust_balance(txn.wallet_id, txn.amount),
        TransactionKind::Transfer => {
            books.adjust_balance(txn.wallet_id, txn.amount);
            if let Some(to_wallet_id) = txn.to_wallet_id {
                books.adjust_balance(to_wallet_id, -txn.transfer_in_amount());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Clock, FixedClock};
    use chrono::NaiveDate;
    use dompet_domain::{Wallet, WalletKind};

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap())
    }

    fn books_with_wallets() -> (Books, Uuid, Uuid) {
        let now = clock().now();
        let mut books = Books::new(now);
        let usd = books.add_wallet(Wallet::new("Travel", WalletKind::Bank, "USD", 100.0, now));
        let idr = books.add_wallet(Wallet::new("Daily", WalletKind::EWallet, "IDR", 0.0, now));
        (books, usd, idr)
    }

    fn transfer(usd: Uuid, idr: Uuid, to_amount: Option<f64>) -> Transaction {
        let now = clock().now();
        Transaction {
            id: Uuid::new_v4(),
            amount: 10.0,
            currency: "USD".into(),
            kind: TransactionKind::Transfer,
            date: clock().today(),
            wallet_id: usd,
            category_id: None,
            to_wallet_id: Some(idr),
            to_amount,
            to_currency: Some("IDR".into()),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn non_transfer_resolves_to_nothing() {
        let (books, usd, idr) = books_with_wallets();
        let fields =
            resolve_transfer_fields(&books, TransactionKind::Expense, usd, Some(idr), Some(5.0));
        assert_eq!(fields, TransferFields::default());
    }

    #[test]
    fn same_currency_transfer_carries_amount_unchanged() {
        let now = clock().now();
        let mut books = Books::new(now);
        let a = books.add_wallet(Wallet::new("A", WalletKind::Bank, "IDR", 0.0, now));
        let b = books.add_wallet(Wallet::new("B", WalletKind::Cash, "IDR", 0.0, now));
        let fields =
            resolve_transfer_fields(&books, TransactionKind::Transfer, a, Some(b), Some(999.0));
        assert_eq!(fields.to_currency.as_deref(), Some("IDR"));
        assert_eq!(fields.to_amount, None);
    }

    #[test]
    fn cross_currency_transfer_trusts_requested_amount() {
        let (books, usd, idr) = books_with_wallets();
        let fields = resolve_transfer_fields(
            &books,
            TransactionKind::Transfer,
            usd,
            Some(idr),
            Some(155_000.0),
        );
        assert_eq!(fields.to_currency.as_deref(), Some("IDR"));
        assert_eq!(fields.to_amount, Some(155_000.0));
    }

    #[test]
    fn cross_currency_effect_is_reversible() {
        let (mut books, usd, idr) = books_with_wallets();
        let txn = transfer(usd, idr, Some(155_000.0));

        apply_effect(&mut books, &txn);
        assert_eq!(books.wallet(usd).unwrap().balance, 90.0);
        assert_eq!(books.wallet(idr).unwrap().balance, 155_000.0);

        reverse_effect(&mut books, &txn);
        assert_eq!(books.wallet(usd).unwrap().balance, 100.0);
        assert_eq!(books.wallet(idr).unwrap().balance, 0.0);
    }

    #[test]
    fn same_currency_transfer_falls_back_to_source_amount() {
        let (mut books, usd, idr) = books_with_wallets();
        let txn = transfer(usd, idr, None);

        apply_effect(&mut books, &txn);
        assert_eq!(books.wallet(usd).unwrap().balance, 90.0);
        assert_eq!(books.wallet(idr).unwrap().balance, 10.0);
    }
}

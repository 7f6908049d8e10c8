//! The wallet registry.

use uuid::Uuid;

use dompet_domain::{Books, Wallet, WalletKind};

use crate::time::Clock;

/// Input for registering a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWallet {
    pub name: String,
    pub kind: WalletKind,
    pub currency: String,
    pub initial_balance: f64,
}

/// Editable wallet fields. Currency is fixed for the wallet's lifetime
/// so that frozen transaction fields stay meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletChanges {
    pub name: String,
    pub kind: WalletKind,
}

/// Owns the wallet collection; balances move only through the ledger.
pub struct WalletService;

impl WalletService {
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewWallet) -> Wallet {
        let wallet = Wallet::new(
            input.name,
            input.kind,
            input.currency,
            input.initial_balance,
            clock.now(),
        );
        let stored = wallet.clone();
        books.add_wallet(wallet);
        stored
    }

    pub fn update(books: &mut Books, clock: &dyn Clock, id: Uuid, changes: WalletChanges) {
        let now = clock.now();
        if let Some(wallet) = books.wallet_mut(id) {
            wallet.name = changes.name;
            wallet.kind = changes.kind;
            wallet.updated_at = now;
            books.touch();
        }
    }

    /// Soft delete: historical transactions stay resolvable.
    pub fn deactivate(books: &mut Books, clock: &dyn Clock, id: Uuid) {
        Self::set_active(books, clock, id, false);
    }

    pub fn reactivate(books: &mut Books, clock: &dyn Clock, id: Uuid) {
        Self::set_active(books, clock, id, true);
    }

    pub fn list(books: &Books) -> Vec<&Wallet> {
        books.wallets.iter().collect()
    }

    pub fn list_active(books: &Books) -> Vec<&Wallet> {
        books
            .wallets
            .iter()
            .filter(|wallet| wallet.is_active)
            .collect()
    }

    fn set_active(books: &mut Books, clock: &dyn Clock, id: Uuid, active: bool) {
        let now = clock.now();
        if let Some(wallet) = books.wallet_mut(id) {
            wallet.is_active = active;
            wallet.updated_at = now;
            books.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap())
    }

    #[test]
    fn deactivated_wallet_remains_resolvable() {
        let clock = clock();
        let mut books = Books::new(clock.0);
        let wallet = WalletService::add(
            &mut books,
            &clock,
            NewWallet {
                name: "Old bank".into(),
                kind: WalletKind::Bank,
                currency: "IDR".into(),
                initial_balance: 10_000.0,
            },
        );
        WalletService::deactivate(&mut books, &clock, wallet.id);

        assert_eq!(WalletService::list_active(&books).len(), 0);
        let stored = books.wallet(wallet.id).unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.balance, 10_000.0);
    }

    #[test]
    fn update_keeps_currency_and_balance() {
        let clock = clock();
        let mut books = Books::new(clock.0);
        let wallet = WalletService::add(
            &mut books,
            &clock,
            NewWallet {
                name: "Cash".into(),
                kind: WalletKind::Cash,
                currency: "IDR".into(),
                initial_balance: 50_000.0,
            },
        );
        WalletService::update(
            &mut books,
            &clock,
            wallet.id,
            WalletChanges {
                name: "Pocket money".into(),
                kind: WalletKind::EWallet,
            },
        );
        let stored = books.wallet(wallet.id).unwrap();
        assert_eq!(stored.name, "Pocket money");
        assert_eq!(stored.kind, WalletKind::EWallet);
        assert_eq!(stored.currency, "IDR");
        assert_eq!(stored.balance, 50_000.0);
    }
}

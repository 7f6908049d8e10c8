//! Debts and receivables, reconciled through the transaction ledger.

use chrono::NaiveDate;
use uuid::Uuid;

use dompet_domain::{Books, Category, CategoryKind, Debt, DebtKind, DebtStatus, TransactionKind};

use crate::time::Clock;
use crate::transaction_service::{NewTransaction, TransactionService};

const DEBT_RECEIVED: &str = "Debt Received";
const RECEIVABLE_GIVEN: &str = "Receivable Given";
const DEBT_PAYMENT: &str = "Debt Payment";
const RECEIVABLE_COLLECTED: &str = "Receivable Collected";

/// Input for registering a debt or receivable.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub kind: DebtKind,
    pub person_name: String,
    pub amount: f64,
    pub wallet_id: Uuid,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// When set, the initial principal movement is booked on the ledger.
    pub create_initial_transaction: bool,
}

/// A payment against (or collection of) an existing debt.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtPayment {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Editable debt fields; the payment ledger is managed separately.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtChanges {
    pub person_name: String,
    pub amount: f64,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Owns debts/receivables and mirrors their money movements into the ledger.
pub struct DebtService;

impl DebtService {
    /// Registers a debt, optionally booking the principal on the ledger
    /// (Debt received is income, receivable given is an expense).
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewDebt) -> Debt {
        let now = clock.now();
        let today = clock.today();
        let currency = books
            .wallet_currency(input.wallet_id)
            .unwrap_or_default()
            .to_string();
        let mut debt = Debt {
            id: Uuid::new_v4(),
            kind: input.kind,
            person_name: input.person_name.clone(),
            amount: input.amount,
            paid_amount: 0.0,
            currency,
            due_date: input.due_date,
            status: DebtStatus::Active,
            wallet_id: input.wallet_id,
            linked_transaction_ids: Vec::new(),
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        debt.refresh_status(today);

        if input.create_initial_transaction {
            let (category_name, category_kind, txn_kind, label) = match input.kind {
                DebtKind::Debt => (
                    DEBT_RECEIVED,
                    CategoryKind::Income,
                    TransactionKind::Income,
                    format!("Debt received from {}", input.person_name),
                ),
                DebtKind::Receivable => (
                    RECEIVABLE_GIVEN,
                    CategoryKind::Expense,
                    TransactionKind::Expense,
                    format!("Receivable given to {}", input.person_name),
                ),
            };
            let category_id = Self::ensure_category(books, clock, category_name, category_kind);
            let txn = TransactionService::add(
                books,
                clock,
                NewTransaction {
                    amount: input.amount,
                    kind: txn_kind,
                    date: today,
                    wallet_id: input.wallet_id,
                    category_id: Some(category_id),
                    to_wallet_id: None,
                    to_amount: None,
                    description: Some(label),
                },
            );
            debt.linked_transaction_ids.push(txn.id);
        }

        let stored = debt.clone();
        books.add_debt(debt);
        stored
    }

    /// Books a payment on the ledger, bumps the paid total and re-derives
    /// the status. Unknown ids are a silent no-op. The payment amount is
    /// taken as given; capping it at the remaining amount is an upstream
    /// concern.
    pub fn make_payment(books: &mut Books, clock: &dyn Clock, debt_id: Uuid, payment: DebtPayment) {
        let Some(debt) = books.debt(debt_id).cloned() else {
            return;
        };
        let (category_name, category_kind, txn_kind, label) = match debt.kind {
            DebtKind::Debt => (
                DEBT_PAYMENT,
                CategoryKind::Expense,
                TransactionKind::Expense,
                format!("Debt payment to {}", debt.person_name),
            ),
            DebtKind::Receivable => (
                RECEIVABLE_COLLECTED,
                CategoryKind::Income,
                TransactionKind::Income,
                format!("Receivable collected from {}", debt.person_name),
            ),
        };
        let category_id = Self::ensure_category(books, clock, category_name, category_kind);
        let txn = TransactionService::add(
            books,
            clock,
            NewTransaction {
                amount: payment.amount,
                kind: txn_kind,
                date: payment.date,
                wallet_id: debt.wallet_id,
                category_id: Some(category_id),
                to_wallet_id: None,
                to_amount: None,
                description: payment.description.or(Some(label)),
            },
        );

        let now = clock.now();
        let today = clock.today();
        if let Some(debt) = books.debt_mut(debt_id) {
            debt.linked_transaction_ids.push(txn.id);
            debt.paid_amount += payment.amount;
            debt.refresh_status(today);
            debt.updated_at = now;
        }
        books.touch();
    }

    /// Explicit write-off: forces the debt settled without booking a
    /// reconciling transaction for the unpaid remainder.
    pub fn mark_settled(books: &mut Books, clock: &dyn Clock, debt_id: Uuid) {
        let now = clock.now();
        if let Some(debt) = books.debt_mut(debt_id) {
            debt.paid_amount = debt.amount;
            debt.status = DebtStatus::Settled;
            debt.updated_at = now;
            books.touch();
        }
    }

    /// Applies an edit and re-derives the status.
    pub fn update(books: &mut Books, clock: &dyn Clock, debt_id: Uuid, changes: DebtChanges) {
        let now = clock.now();
        let today = clock.today();
        if let Some(debt) = books.debt_mut(debt_id) {
            debt.person_name = changes.person_name;
            debt.amount = changes.amount;
            debt.due_date = changes.due_date;
            debt.description = changes.description;
            debt.refresh_status(today);
            debt.updated_at = now;
            books.touch();
        }
    }

    /// Removes the debt record only. Linked transactions stay on the
    /// ledger: their wallet effects are independent of the debt's
    /// existence, and reversing them here would double-undo balances.
    pub fn remove(books: &mut Books, id: Uuid) {
        let before = books.debts.len();
        books.debts.retain(|debt| debt.id != id);
        if books.debts.len() != before {
            books.touch();
        }
    }

    /// Idempotent lookup-or-create for the ledger's helper categories.
    fn ensure_category(
        books: &mut Books,
        clock: &dyn Clock,
        name: &str,
        kind: CategoryKind,
    ) -> Uuid {
        if let Some(existing) = books
            .categories
            .iter()
            .find(|category| category.kind == kind && category.name.eq_ignore_ascii_case(name))
        {
            return existing.id;
        }
        books.add_category(Category::new(name, kind, clock.now()).as_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;
    use dompet_domain::{Wallet, WalletKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Books, FixedClock, Uuid) {
        let clock = FixedClock::on(date(2025, 8, 7));
        let mut books = Books::new(clock.0);
        let wallet = books.add_wallet(Wallet::new(
            "Main",
            WalletKind::Bank,
            "IDR",
            1_000_000.0,
            clock.0,
        ));
        (books, clock, wallet)
    }

    fn receivable(wallet: Uuid, initial: bool) -> NewDebt {
        NewDebt {
            kind: DebtKind::Receivable,
            person_name: "Sari".into(),
            amount: 300_000.0,
            wallet_id: wallet,
            due_date: None,
            description: None,
            create_initial_transaction: initial,
        }
    }

    #[test]
    fn initial_transaction_moves_the_balance_and_links() {
        let (mut books, clock, wallet) = setup();
        let debt = DebtService::add(&mut books, &clock, receivable(wallet, true));
        assert_eq!(debt.linked_transaction_ids.len(), 1);
        assert_eq!(books.wallet(wallet).unwrap().balance, 700_000.0);
        assert_eq!(debt.status, DebtStatus::Active);
        assert_eq!(debt.currency, "IDR");
    }

    #[test]
    fn helper_category_is_created_once() {
        let (mut books, clock, wallet) = setup();
        DebtService::add(&mut books, &clock, receivable(wallet, true));
        DebtService::add(&mut books, &clock, receivable(wallet, true));
        let matching: Vec<_> = books
            .categories
            .iter()
            .filter(|category| category.name == RECEIVABLE_GIVEN)
            .collect();
        assert_eq!(matching.len(), 1);
        assert!(matching[0].is_default);
    }

    #[test]
    fn payments_accumulate_and_derive_status() {
        let (mut books, clock, wallet) = setup();
        let debt = DebtService::add(&mut books, &clock, receivable(wallet, false));
        DebtService::make_payment(
            &mut books,
            &clock,
            debt.id,
            DebtPayment {
                amount: 100_000.0,
                date: date(2025, 8, 7),
                description: None,
            },
        );
        let stored = books.debt(debt.id).unwrap();
        assert_eq!(stored.paid_amount, 100_000.0);
        assert_eq!(stored.status, DebtStatus::PartiallyPaid);
        assert_eq!(stored.linked_transaction_ids.len(), 1);
        // Collection of a receivable is income.
        assert_eq!(books.wallet(wallet).unwrap().balance, 1_100_000.0);

        DebtService::make_payment(
            &mut books,
            &clock,
            debt.id,
            DebtPayment {
                amount: 200_000.0,
                date: date(2025, 8, 7),
                description: None,
            },
        );
        assert_eq!(books.debt(debt.id).unwrap().status, DebtStatus::Settled);
    }

    #[test]
    fn payment_on_unknown_debt_is_a_no_op() {
        let (mut books, clock, _wallet) = setup();
        DebtService::make_payment(
            &mut books,
            &clock,
            Uuid::new_v4(),
            DebtPayment {
                amount: 100_000.0,
                date: date(2025, 8, 7),
                description: None,
            },
        );
        assert!(books.transactions.is_empty());
    }

    #[test]
    fn mark_settled_writes_off_without_a_transaction() {
        let (mut books, clock, wallet) = setup();
        let debt = DebtService::add(&mut books, &clock, receivable(wallet, false));
        DebtService::make_payment(
            &mut books,
            &clock,
            debt.id,
            DebtPayment {
                amount: 50_000.0,
                date: date(2025, 8, 7),
                description: None,
            },
        );
        DebtService::mark_settled(&mut books, &clock, debt.id);

        let stored = books.debt(debt.id).unwrap();
        assert_eq!(stored.status, DebtStatus::Settled);
        assert_eq!(stored.paid_amount, stored.amount);
        // Only the payment hit the ledger; the write-off did not.
        assert_eq!(books.transactions.len(), 1);
        assert_eq!(stored.linked_transaction_ids.len(), 1);
    }

    #[test]
    fn deleting_a_debt_keeps_its_transactions() {
        let (mut books, clock, wallet) = setup();
        let debt = DebtService::add(&mut books, &clock, receivable(wallet, true));
        DebtService::remove(&mut books, debt.id);
        assert!(books.debt(debt.id).is_none());
        assert_eq!(books.transactions.len(), 1);
        assert_eq!(books.wallet(wallet).unwrap().balance, 700_000.0);
    }

    #[test]
    fn overdue_beats_partial_but_not_settled() {
        let (mut books, clock, wallet) = setup();
        let mut input = receivable(wallet, false);
        input.due_date = Some(date(2025, 1, 1));
        let debt = DebtService::add(&mut books, &clock, input);
        assert_eq!(books.debt(debt.id).unwrap().status, DebtStatus::Overdue);

        DebtService::make_payment(
            &mut books,
            &clock,
            debt.id,
            DebtPayment {
                amount: 100_000.0,
                date: date(2025, 8, 7),
                description: None,
            },
        );
        assert_eq!(books.debt(debt.id).unwrap().status, DebtStatus::Overdue);

        DebtService::mark_settled(&mut books, &clock, debt.id);
        assert_eq!(books.debt(debt.id).unwrap().status, DebtStatus::Settled);
    }
}

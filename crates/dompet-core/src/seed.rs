//! Demo fixture loader.
//!
//! Bulk-overwrites every collection with a small, coherent data set for
//! the "try demo" entry point. All entries go through the services so
//! balances and budget totals come out consistent.

use chrono::Datelike;

use dompet_domain::{Books, CategoryKind, Frequency, TransactionKind, WalletKind};

use crate::budget_service::{BudgetService, NewBudget};
use crate::category_service::{CategoryService, NewCategory};
use crate::recurring_service::{NewRecurring, RecurringService};
use crate::time::Clock;
use crate::transaction_service::{NewTransaction, TransactionService};
use crate::wallet_service::{NewWallet, WalletService};

/// Replaces the books with the demo fixture.
pub fn load_demo(books: &mut Books, clock: &dyn Clock) {
    *books = Books::new(clock.now());
    let today = clock.today();
    let month_start = today.with_day(1).unwrap_or(today);

    let bank = WalletService::add(
        books,
        clock,
        NewWallet {
            name: "BCA Savings".into(),
            kind: WalletKind::Bank,
            currency: "IDR".into(),
            initial_balance: 2_500_000.0,
        },
    );
    let cash = WalletService::add(
        books,
        clock,
        NewWallet {
            name: "Cash".into(),
            kind: WalletKind::Cash,
            currency: "IDR".into(),
            initial_balance: 300_000.0,
        },
    );
    let ewallet = WalletService::add(
        books,
        clock,
        NewWallet {
            name: "GoPay".into(),
            kind: WalletKind::EWallet,
            currency: "IDR".into(),
            initial_balance: 150_000.0,
        },
    );

    let salary = default_category(books, clock, "Salary", CategoryKind::Income);
    let food = default_category(books, clock, "Food & Drink", CategoryKind::Expense);
    let transport = default_category(books, clock, "Transport", CategoryKind::Expense);
    default_category(books, clock, "Bills", CategoryKind::Expense);
    default_category(books, clock, "Shopping", CategoryKind::Expense);

    TransactionService::add(
        books,
        clock,
        NewTransaction {
            amount: 5_000_000.0,
            kind: TransactionKind::Income,
            date: month_start,
            wallet_id: bank.id,
            category_id: Some(salary.id),
            to_wallet_id: None,
            to_amount: None,
            description: Some("Monthly salary".into()),
        },
    );
    TransactionService::add(
        books,
        clock,
        NewTransaction {
            amount: 85_000.0,
            kind: TransactionKind::Expense,
            date: today,
            wallet_id: cash.id,
            category_id: Some(food.id),
            to_wallet_id: None,
            to_amount: None,
            description: Some("Warung lunch".into()),
        },
    );
    TransactionService::add(
        books,
        clock,
        NewTransaction {
            amount: 200_000.0,
            kind: TransactionKind::Transfer,
            date: today,
            wallet_id: bank.id,
            category_id: None,
            to_wallet_id: Some(ewallet.id),
            to_amount: None,
            description: Some("Top up GoPay".into()),
        },
    );

    BudgetService::add(
        books,
        clock,
        NewBudget {
            category_id: food.id,
            month: today.month(),
            year: today.year(),
            amount: 1_500_000.0,
            currency: "IDR".into(),
        },
    );
    BudgetService::add(
        books,
        clock,
        NewBudget {
            category_id: transport.id,
            month: today.month(),
            year: today.year(),
            amount: 600_000.0,
            currency: "IDR".into(),
        },
    );

    RecurringService::add(
        books,
        clock,
        NewRecurring {
            name: "Internet bill".into(),
            amount: 350_000.0,
            kind: TransactionKind::Expense,
            wallet_id: bank.id,
            category_id: None,
            to_wallet_id: None,
            to_amount: None,
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: month_start,
            end_date: None,
        },
    );

    tracing::info!(
        wallets = books.wallets.len(),
        transactions = books.transactions.len(),
        "demo data loaded"
    );
}

fn default_category(
    books: &mut Books,
    clock: &dyn Clock,
    name: &str,
    kind: CategoryKind,
) -> dompet_domain::Category {
    CategoryService::add(
        books,
        clock,
        NewCategory {
            name: name.into(),
            kind,
            is_default: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn demo_data_is_internally_consistent() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
        let mut books = Books::new(clock.0);
        load_demo(&mut books, &clock);

        assert_eq!(books.wallets.len(), 3);
        assert_eq!(books.transactions.len(), 3);
        assert_eq!(books.budgets.len(), 2);

        let bank = &books.wallets[0];
        // 2.5M opening + 5M salary - 200k top-up.
        assert_eq!(bank.balance, 7_300_000.0);
        let food_budget = &books.budgets[0];
        assert_eq!(food_budget.spent, 85_000.0);
    }

    #[test]
    fn loading_twice_resets_rather_than_appends() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
        let mut books = Books::new(clock.0);
        load_demo(&mut books, &clock);
        load_demo(&mut books, &clock);
        assert_eq!(books.wallets.len(), 3);
        assert_eq!(books.transactions.len(), 3);
    }
}

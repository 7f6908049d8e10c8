//! Budget caps and the derived "spent" aggregate.

use uuid::Uuid;

use dompet_domain::{in_calendar_month, Books, Budget, BudgetView};

use crate::time::Clock;

/// Input for creating a budget cap.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_id: Uuid,
    /// 1-based calendar month.
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub currency: String,
}

/// Owns budget caps and keeps their spent totals in sync with the ledger.
pub struct BudgetService;

impl BudgetService {
    /// Creates a budget and immediately recomputes its spent total so
    /// transactions recorded before the budget existed are reflected.
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewBudget) -> Budget {
        let now = clock.now();
        let budget = Budget {
            id: Uuid::new_v4(),
            category_id: input.category_id,
            month: input.month,
            year: input.year,
            amount: input.amount,
            spent: 0.0,
            currency: input.currency,
            created_at: now,
            updated_at: now,
        };
        let fallback = budget.clone();
        let id = books.add_budget(budget);
        Self::recalculate_spent(books, input.category_id);
        match books.budget(id) {
            Some(stored) => stored.clone(),
            None => fallback,
        }
    }

    /// Changes the cap only; the spent total is untouched.
    pub fn update_amount(books: &mut Books, clock: &dyn Clock, id: Uuid, amount: f64) {
        let now = clock.now();
        if let Some(budget) = books.budget_mut(id) {
            budget.amount = amount;
            budget.updated_at = now;
            books.touch();
        }
    }

    /// Deletes a budget. No-op when missing.
    pub fn remove(books: &mut Books, id: Uuid) {
        let before = books.budgets.len();
        books.budgets.retain(|budget| budget.id != id);
        if books.budgets.len() != before {
            books.touch();
        }
    }

    /// Moves the tracker's focus. Totals for the new period refresh
    /// lazily on the next mutation touching their category.
    pub fn set_period(books: &mut Books, month: u32, year: i32) {
        books.budget_view = BudgetView::new(month, year);
        books.touch();
    }

    /// Recomputes the spent total for every budget of `category_id` in
    /// the currently selected period.
    ///
    /// `spent` is the sum of expense transactions matching the budget's
    /// category, currency and calendar month. Budgets for other periods
    /// are deliberately left stale until the selection reaches them.
    pub fn recalculate_spent(books: &mut Books, category_id: Uuid) {
        let view = books.budget_view;
        let mut totals: Vec<(Uuid, f64)> = Vec::new();
        for budget in books.budgets.iter().filter(|budget| {
            budget.category_id == category_id
                && budget.month == view.month
                && budget.year == view.year
        }) {
            let spent = books
                .transactions
                .iter()
                .filter(|txn| {
                    txn.is_expense_in(category_id)
                        && txn.currency == budget.currency
                        && in_calendar_month(txn.date, budget.month, budget.year)
                })
                .map(|txn| txn.amount)
                .sum();
            totals.push((budget.id, spent));
        }
        for (id, spent) in totals {
            if let Some(budget) = books.budget_mut(id) {
                budget.spent = spent;
            }
        }
    }
}

//! The single state container holding every persisted collection.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::{Budget, BudgetView};
use crate::category::Category;
use crate::debt::Debt;
use crate::recurring::RecurringTransaction;
use crate::shopping::ShoppingList;
use crate::template::TransactionTemplate;
use crate::transaction::Transaction;
use crate::wallet::Wallet;

/// All domain collections plus the budget tracker's selected period.
///
/// Services mutate a `Books` value passed by reference; there is no
/// ambient global state. Every cross-collection call runs to completion
/// on the same call stack before control returns to the caller, which is
/// what keeps wallet balances and budget totals consistent without locks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Books {
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub shopping_lists: Vec<ShoppingList>,
    #[serde(default)]
    pub templates: Vec<TransactionTemplate>,
    /// The month/year budget totals are kept fresh for.
    pub budget_view: BudgetView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Books {
    /// Creates empty books focused on the month containing `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            wallets: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            recurring: Vec::new(),
            debts: Vec::new(),
            shopping_lists: Vec::new(),
            templates: Vec::new(),
            budget_view: BudgetView::new(today.month(), today.year()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps the modification timestamp after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn wallet(&self, id: Uuid) -> Option<&Wallet> {
        self.wallets.iter().find(|wallet| wallet.id == id)
    }

    pub fn wallet_mut(&mut self, id: Uuid) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|wallet| wallet.id == id)
    }

    pub fn add_wallet(&mut self, wallet: Wallet) -> Uuid {
        let id = wallet.id;
        self.wallets.push(wallet);
        self.touch();
        id
    }

    /// Resolves a wallet's currency code, if the wallet exists.
    pub fn wallet_currency(&self, id: Uuid) -> Option<&str> {
        self.wallet(id).map(|wallet| wallet.currency.as_str())
    }

    /// The Wallet Registry's atomic balance primitive.
    ///
    /// Unknown wallet ids are ignored so that reversal of an entry whose
    /// wallet has since been deactivated-and-purged stays a no-op.
    pub fn adjust_balance(&mut self, wallet_id: Uuid, delta: f64) {
        if let Some(wallet) = self.wallet_mut(wallet_id) {
            wallet.balance += delta;
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    pub fn recurring_by_id(&self, id: Uuid) -> Option<&RecurringTransaction> {
        self.recurring.iter().find(|rec| rec.id == id)
    }

    pub fn recurring_mut(&mut self, id: Uuid) -> Option<&mut RecurringTransaction> {
        self.recurring.iter_mut().find(|rec| rec.id == id)
    }

    pub fn add_recurring(&mut self, recurring: RecurringTransaction) -> Uuid {
        let id = recurring.id;
        self.recurring.push(recurring);
        self.touch();
        id
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|debt| debt.id == id)
    }

    pub fn debt_mut(&mut self, id: Uuid) -> Option<&mut Debt> {
        self.debts.iter_mut().find(|debt| debt.id == id)
    }

    pub fn add_debt(&mut self, debt: Debt) -> Uuid {
        let id = debt.id;
        self.debts.push(debt);
        self.touch();
        id
    }

    pub fn shopping_list(&self, id: Uuid) -> Option<&ShoppingList> {
        self.shopping_lists.iter().find(|list| list.id == id)
    }

    pub fn shopping_list_mut(&mut self, id: Uuid) -> Option<&mut ShoppingList> {
        self.shopping_lists.iter_mut().find(|list| list.id == id)
    }

    pub fn add_shopping_list(&mut self, list: ShoppingList) -> Uuid {
        let id = list.id;
        self.shopping_lists.push(list);
        self.touch();
        id
    }

    pub fn template(&self, id: Uuid) -> Option<&TransactionTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn template_mut(&mut self, id: Uuid) -> Option<&mut TransactionTemplate> {
        self.templates.iter_mut().find(|template| template.id == id)
    }

    pub fn add_template(&mut self, template: TransactionTemplate) -> Uuid {
        let id = template.id;
        self.templates.push(template);
        self.touch();
        id
    }
}

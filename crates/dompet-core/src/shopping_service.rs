//! Shopping lists whose purchases materialize ledger entries.

use uuid::Uuid;

use dompet_domain::{
    Books, ShoppingItem, ShoppingItemStatus, ShoppingList, ShoppingListStatus, TransactionKind,
};

use crate::time::Clock;
use crate::transaction_service::{NewTransaction, TransactionService};

/// Input for creating a shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShoppingList {
    pub name: String,
    pub wallet_id: Uuid,
    pub description: Option<String>,
}

/// Input for creating or overwriting a shopping item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub estimated_price: f64,
    pub category_id: Option<Uuid>,
}

/// Owns shopping lists and turns purchases into ledger entries.
pub struct ShoppingService;

impl ShoppingService {
    /// Creates a list bound to a wallet; the list inherits its currency.
    pub fn add_list(books: &mut Books, clock: &dyn Clock, input: NewShoppingList) -> ShoppingList {
        let now = clock.now();
        let currency = books
            .wallet_currency(input.wallet_id)
            .unwrap_or_default()
            .to_string();
        let list = ShoppingList {
            id: Uuid::new_v4(),
            name: input.name,
            wallet_id: input.wallet_id,
            currency,
            status: ShoppingListStatus::Active,
            items: Vec::new(),
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        let stored = list.clone();
        books.add_shopping_list(list);
        stored
    }

    /// Renames a list. The wallet binding is fixed at creation.
    pub fn update_list(
        books: &mut Books,
        clock: &dyn Clock,
        list_id: Uuid,
        name: String,
        description: Option<String>,
    ) {
        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            list.name = name;
            list.description = description;
            list.updated_at = now;
            books.touch();
        }
    }

    /// Hard-deletes a list. Transactions from purchased items stay.
    pub fn remove_list(books: &mut Books, id: Uuid) {
        let before = books.shopping_lists.len();
        books.shopping_lists.retain(|list| list.id != id);
        if books.shopping_lists.len() != before {
            books.touch();
        }
    }

    /// Archives regardless of completion state; items are untouched.
    pub fn archive_list(books: &mut Books, clock: &dyn Clock, id: Uuid) {
        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(id) {
            list.status = ShoppingListStatus::Archived;
            list.updated_at = now;
            books.touch();
        }
    }

    pub fn add_item(
        books: &mut Books,
        clock: &dyn Clock,
        list_id: Uuid,
        input: NewShoppingItem,
    ) -> Option<ShoppingItem> {
        let now = clock.now();
        let list = books.shopping_list_mut(list_id)?;
        let mut item = ShoppingItem::new(input.name, input.quantity, input.estimated_price);
        item.category_id = input.category_id;
        let stored = item.clone();
        list.items.push(item);
        list.updated_at = now;
        books.touch();
        Some(stored)
    }

    /// Overwrites an item's editable fields; status is managed by the
    /// purchase/skip/pending operations.
    pub fn update_item(
        books: &mut Books,
        clock: &dyn Clock,
        list_id: Uuid,
        item_id: Uuid,
        changes: NewShoppingItem,
    ) {
        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            if let Some(item) = list.item_mut(item_id) {
                item.name = changes.name;
                item.quantity = changes.quantity;
                item.estimated_price = changes.estimated_price;
                item.category_id = changes.category_id;
                list.updated_at = now;
                books.touch();
            }
        }
    }

    /// Drops an item without touching the ledger; only pending items are
    /// expected here, so no linked transaction exists yet.
    pub fn remove_item(books: &mut Books, clock: &dyn Clock, list_id: Uuid, item_id: Uuid) {
        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            let before = list.items.len();
            list.items.retain(|item| item.id != item_id);
            if list.items.len() != before {
                list.updated_at = now;
                books.touch();
            }
        }
    }

    /// Buys one item: books an expense of `actual_price` (or the
    /// estimated total) against the list's wallet and the item's
    /// category, links the entry, and re-evaluates completion.
    pub fn purchase_item(
        books: &mut Books,
        clock: &dyn Clock,
        list_id: Uuid,
        item_id: Uuid,
        actual_price: Option<f64>,
    ) {
        let Some(list) = books.shopping_list(list_id) else {
            return;
        };
        let Some(item) = list.item(item_id) else {
            return;
        };
        let wallet_id = list.wallet_id;
        let amount = actual_price.unwrap_or_else(|| item.estimated_total());
        let category_id = item.category_id;
        let label = item.name.clone();

        let txn = TransactionService::add(
            books,
            clock,
            NewTransaction {
                amount,
                kind: TransactionKind::Expense,
                date: clock.today(),
                wallet_id,
                category_id,
                to_wallet_id: None,
                to_amount: None,
                description: Some(label),
            },
        );

        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            if let Some(item) = list.item_mut(item_id) {
                item.status = ShoppingItemStatus::Purchased;
                item.actual_price = Some(amount);
                item.linked_transaction_id = Some(txn.id);
            }
            Self::refresh_completion(list);
            list.updated_at = now;
        }
        books.touch();
    }

    /// Buys every pending item, one independent transaction per item so
    /// a single item can later be reverted on its own. Returns how many
    /// items were purchased.
    pub fn purchase_all_remaining(books: &mut Books, clock: &dyn Clock, list_id: Uuid) -> usize {
        let Some(list) = books.shopping_list(list_id) else {
            return 0;
        };
        let pending: Vec<Uuid> = list
            .items
            .iter()
            .filter(|item| item.status == ShoppingItemStatus::Pending)
            .map(|item| item.id)
            .collect();
        for item_id in &pending {
            Self::purchase_item(books, clock, list_id, *item_id, None);
        }
        pending.len()
    }

    /// Marks an item skipped; no ledger entry is involved.
    pub fn skip_item(books: &mut Books, clock: &dyn Clock, list_id: Uuid, item_id: Uuid) {
        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            if let Some(item) = list.item_mut(item_id) {
                item.status = ShoppingItemStatus::Skipped;
                Self::refresh_completion(list);
                list.updated_at = now;
                books.touch();
            }
        }
    }

    /// Reverts an item to pending. A purchased item's linked transaction
    /// is deleted through the ledger (reversing its balance effect), and
    /// the list is forced back to active: reopening any one item reopens
    /// the whole list.
    pub fn mark_item_pending(books: &mut Books, clock: &dyn Clock, list_id: Uuid, item_id: Uuid) {
        let Some(list) = books.shopping_list(list_id) else {
            return;
        };
        let Some(item) = list.item(item_id) else {
            return;
        };
        let linked = (item.status == ShoppingItemStatus::Purchased)
            .then_some(item.linked_transaction_id)
            .flatten();
        if let Some(txn_id) = linked {
            TransactionService::remove(books, txn_id);
        }

        let now = clock.now();
        if let Some(list) = books.shopping_list_mut(list_id) {
            if let Some(item) = list.item_mut(item_id) {
                item.status = ShoppingItemStatus::Pending;
                item.actual_price = None;
                item.linked_transaction_id = None;
            }
            list.status = ShoppingListStatus::Active;
            list.updated_at = now;
        }
        books.touch();
    }

    /// Auto-completion: a non-empty list whose items are all purchased or
    /// skipped becomes completed. Anything else is left as-is, and an
    /// archived list never transitions on its own.
    fn refresh_completion(list: &mut ShoppingList) {
        if list.status == ShoppingListStatus::Archived {
            return;
        }
        if list.all_items_settled() {
            list.status = ShoppingListStatus::Completed;
        }
    }
}

//! Shopping lists whose purchased items turn into ledger entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity};

/// A shopping list bound to one wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingList {
    pub id: Uuid,
    pub name: String,
    pub wallet_id: Uuid,
    pub currency: String,
    pub status: ShoppingListStatus,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn item(&self, item_id: Uuid) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Option<&mut ShoppingItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Whether every item has been either purchased or skipped.
    ///
    /// An empty list never counts as settled.
    pub fn all_items_settled(&self) -> bool {
        !self.items.is_empty()
            && self.items.iter().all(|item| {
                matches!(
                    item.status,
                    ShoppingItemStatus::Purchased | ShoppingItemStatus::Skipped
                )
            })
    }
}

impl Identifiable for ShoppingList {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for ShoppingList {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Lifecycle of a shopping list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShoppingListStatus {
    Active,
    Completed,
    Archived,
}

impl fmt::Display for ShoppingListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShoppingListStatus::Active => "Active",
            ShoppingListStatus::Completed => "Completed",
            ShoppingListStatus::Archived => "Archived",
        };
        f.write_str(label)
    }
}

/// One line on a shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub estimated_price: f64,
    /// Set when purchased; holds the amount actually booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub status: ShoppingItemStatus,
    /// Ledger entry created by the purchase, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_transaction_id: Option<Uuid>,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, quantity: f64, estimated_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            estimated_price,
            actual_price: None,
            category_id: None,
            status: ShoppingItemStatus::Pending,
            linked_transaction_id: None,
        }
    }

    /// The amount a purchase would book without an explicit actual price.
    pub fn estimated_total(&self) -> f64 {
        self.estimated_price * self.quantity
    }
}

impl Identifiable for ShoppingItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Purchase state of a single item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShoppingItemStatus {
    Pending,
    Purchased,
    Skipped,
}

impl fmt::Display for ShoppingItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShoppingItemStatus::Pending => "Pending",
            ShoppingItemStatus::Purchased => "Purchased",
            ShoppingItemStatus::Skipped => "Skipped",
        };
        f.write_str(label)
    }
}

//! The category registry.

use uuid::Uuid;

use dompet_domain::{Books, Category, CategoryKind};

use crate::time::Clock;

/// Input for registering a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub is_default: bool,
}

/// Owns category definitions and their deletion guards.
pub struct CategoryService;

impl CategoryService {
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewCategory) -> Category {
        let mut category = Category::new(input.name, input.kind, clock.now());
        category.is_default = input.is_default;
        let stored = category.clone();
        books.add_category(category);
        stored
    }

    /// Renames a category; its kind is fixed at creation.
    pub fn update(books: &mut Books, clock: &dyn Clock, id: Uuid, name: String) {
        let now = clock.now();
        if let Some(category) = books.category_mut(id) {
            category.name = name;
            category.updated_at = now;
            books.touch();
        }
    }

    /// Guarded deletion: refuses default categories and categories still
    /// referenced by any transaction. The refusal is reported through
    /// the return value, not an error.
    pub fn remove(books: &mut Books, id: Uuid) -> bool {
        let Some(category) = books.category(id) else {
            return false;
        };
        if category.is_default {
            return false;
        }
        if books
            .transactions
            .iter()
            .any(|txn| txn.category_id == Some(id))
        {
            return false;
        }
        books.categories.retain(|category| category.id != id);
        books.touch();
        true
    }

    pub fn list(books: &Books) -> Vec<&Category> {
        books.categories.iter().collect()
    }

    pub fn by_kind(books: &Books, kind: CategoryKind) -> Vec<&Category> {
        books
            .categories
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }
}

//! Saved transaction presets.

use chrono::NaiveDate;
use uuid::Uuid;

use dompet_domain::{Books, Transaction, TransactionKind, TransactionTemplate};

use crate::time::Clock;
use crate::transaction_service::{NewTransaction, TransactionService};

/// Input for creating or overwriting a template.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub wallet_id: Uuid,
    pub category_id: Option<Uuid>,
    pub to_wallet_id: Option<Uuid>,
    pub description: Option<String>,
}

/// Owns saved presets and materializes them through the ledger.
pub struct TemplateService;

impl TemplateService {
    pub fn add(books: &mut Books, clock: &dyn Clock, input: NewTemplate) -> TransactionTemplate {
        let now = clock.now();
        let template = TransactionTemplate {
            id: Uuid::new_v4(),
            name: input.name,
            amount: input.amount,
            kind: input.kind,
            wallet_id: input.wallet_id,
            category_id: input.category_id,
            to_wallet_id: input.to_wallet_id,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        let stored = template.clone();
        books.add_template(template);
        stored
    }

    pub fn update(books: &mut Books, clock: &dyn Clock, id: Uuid, changes: NewTemplate) {
        let now = clock.now();
        if let Some(template) = books.template_mut(id) {
            template.name = changes.name;
            template.amount = changes.amount;
            template.kind = changes.kind;
            template.wallet_id = changes.wallet_id;
            template.category_id = changes.category_id;
            template.to_wallet_id = changes.to_wallet_id;
            template.description = changes.description;
            template.updated_at = now;
            books.touch();
        }
    }

    pub fn remove(books: &mut Books, id: Uuid) {
        let before = books.templates.len();
        books.templates.retain(|template| template.id != id);
        if books.templates.len() != before {
            books.touch();
        }
    }

    pub fn list(books: &Books) -> Vec<&TransactionTemplate> {
        books.templates.iter().collect()
    }

    /// Books a ledger entry from the preset, dated at `date`. Returns
    /// `None` for unknown templates.
    pub fn apply(
        books: &mut Books,
        clock: &dyn Clock,
        template_id: Uuid,
        date: NaiveDate,
    ) -> Option<Transaction> {
        let template = books.template(template_id).cloned()?;
        Some(TransactionService::add(
            books,
            clock,
            NewTransaction {
                amount: template.amount,
                kind: template.kind,
                date,
                wallet_id: template.wallet_id,
                category_id: template.category_id,
                to_wallet_id: template.to_wallet_id,
                to_amount: None,
                description: template.description.or(Some(template.name)),
            },
        ))
    }
}

//! Saved transaction presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity};
use crate::transaction::TransactionKind;

/// A reusable prefill for frequently entered transactions.
///
/// Templates carry no date; one is supplied when the template is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTemplate {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub wallet_id: Uuid,
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_wallet_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for TransactionTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for TransactionTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

//! Domain types for wallets and their running balances.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity};

/// A money container with a single fixed currency and a running balance.
///
/// Wallets are never hard-deleted; deactivating one keeps historical
/// transactions resolvable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub id: Uuid,
    pub name: String,
    pub kind: WalletKind,
    pub currency: String,
    pub balance: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(
        name: impl Into<String>,
        kind: WalletKind,
        currency: impl Into<String>,
        balance: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            currency: currency.into(),
            balance,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for Wallet {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Wallet {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Supported wallet flavours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WalletKind {
    EWallet,
    Bank,
    Cash,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WalletKind::EWallet => "E-Wallet",
            WalletKind::Bank => "Bank",
            WalletKind::Cash => "Cash",
        };
        f.write_str(label)
    }
}

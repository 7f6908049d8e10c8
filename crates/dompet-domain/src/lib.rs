//! dompet-domain
//!
//! Pure domain models (Books, Wallet, Category, Transaction, Budget,
//! RecurringTransaction, Debt, ShoppingList, etc.).
//! No I/O, no services, no storage. Only data types and core enums.

pub mod books;
pub mod budget;
pub mod category;
pub mod common;
pub mod debt;
pub mod recurring;
pub mod shopping;
pub mod template;
pub mod transaction;
pub mod wallet;

pub use books::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use debt::*;
pub use recurring::*;
pub use shopping::*;
pub use template::*;
pub use transaction::*;
pub use wallet::*;

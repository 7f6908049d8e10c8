//! dompet-core
//!
//! Business logic and services for Dompet. Depends on dompet-domain.
//! No terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod category_service;
pub mod currency;
pub mod debt_service;
pub mod error;
pub mod logging;
pub mod recurring_service;
pub mod seed;
pub mod shopping_service;
pub mod storage;
pub mod template_service;
pub mod time;
pub mod transaction_service;
pub mod wallet_service;

pub use budget_service::*;
pub use category_service::*;
pub use currency::*;
pub use debt_service::*;
pub use error::CoreError;
pub use recurring_service::*;
pub use shopping_service::*;
pub use storage::*;
pub use template_service::*;
pub use time::*;
pub use transaction_service::*;
pub use wallet_service::*;

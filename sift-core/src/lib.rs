//! sift-core: data model shared by statement ingestion and reporting

pub mod category;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use money::{format_amount, parse_amount};
pub use transaction::{FeeKind, Lender, Transaction, TxnType};

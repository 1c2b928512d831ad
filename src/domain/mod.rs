//! Pure domain models for the finance tracker.
//!
//! No I/O and no presentation concerns; only records, enums and the ledger
//! state that owns them.

pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::{Category, CategoryId, UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL};
pub use common::{Displayable, Identifiable, NamedEntity, TransactionKind};
pub use ledger::{IdCounters, Ledger, UnreadableRecords};
pub use transaction::{Transaction, TransactionDraft, TransactionId};

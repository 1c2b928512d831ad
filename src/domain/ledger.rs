use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    category::{Category, CategoryId, UNCATEGORIZED_LABEL},
    common::{next_free_id, NamedEntity},
    transaction::{Transaction, TransactionId},
};

const FIRST_TRANSACTION_ID: TransactionId = 1;
const FIRST_CUSTOM_CATEGORY_ID: CategoryId = 9;

/// Monotonic id allocators for both collections. Never rewound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdCounters {
    #[serde(default)]
    pub next_transaction_id: TransactionId,
    #[serde(default)]
    pub next_category_id: CategoryId,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            next_transaction_id: FIRST_TRANSACTION_ID,
            next_category_id: FIRST_CUSTOM_CATEGORY_ID,
        }
    }
}

impl IdCounters {
    /// Replaces zero counters with their defaults.
    pub fn or_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            next_transaction_id: if self.next_transaction_id == 0 {
                defaults.next_transaction_id
            } else {
                self.next_transaction_id
            },
            next_category_id: if self.next_category_id == 0 {
                defaults.next_category_id
            } else {
                self.next_category_id
            },
        }
    }
}

/// Stored entries that could not be decoded. They are kept verbatim and
/// written back on save so a later mutation never drops them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnreadableRecords {
    pub transactions: Vec<Value>,
    pub categories: Vec<Value>,
}

/// In-memory application state: both collections plus their id counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub counters: IdCounters,
    pub unreadable: UnreadableRecords,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_default_categories()
    }
}

impl Ledger {
    pub fn new(categories: Vec<Category>, transactions: Vec<Transaction>, counters: IdCounters) -> Self {
        let mut ledger = Self {
            categories,
            transactions,
            counters: counters.or_defaults(),
            unreadable: UnreadableRecords::default(),
        };
        ledger.reconcile_counters();
        ledger
    }

    /// Fresh state seeded with the built-in categories and no transactions.
    pub fn with_default_categories() -> Self {
        Self::new(Category::defaults(), Vec::new(), IdCounters::default())
    }

    /// Raises counters that lag behind ids already present, including ids of
    /// unreadable entries. Returns `true` when a counter had to move.
    pub fn reconcile_counters(&mut self) -> bool {
        let min_txn =
            next_free_id(&self.transactions).max(next_raw_id(&self.unreadable.transactions));
        let min_cat =
            next_free_id(&self.categories).max(next_raw_id(&self.unreadable.categories));
        let mut moved = false;
        if self.counters.next_transaction_id < min_txn {
            self.counters.next_transaction_id = min_txn;
            moved = true;
        }
        if self.counters.next_category_id < min_cat {
            self.counters.next_category_id = min_cat;
            moved = true;
        }
        moved
    }

    /// Hands out the next transaction id, or `None` once the counter is exhausted.
    pub fn allocate_transaction_id(&mut self) -> Option<TransactionId> {
        let id = self.counters.next_transaction_id;
        self.counters.next_transaction_id = id.checked_add(1)?;
        Some(id)
    }

    pub fn allocate_category_id(&mut self) -> Option<CategoryId> {
        let id = self.counters.next_category_id;
        self.counters.next_category_id = id.checked_add(1)?;
        Some(id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Resolves a possibly stale category reference to a display name.
    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        id.and_then(|id| self.category(id))
            .map_or(UNCATEGORIZED_LABEL, NamedEntity::name)
    }
}

fn next_raw_id(values: &[Value]) -> u64 {
    values
        .iter()
        .filter_map(|value| value.get("id").and_then(Value::as_u64))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TransactionDraft, TransactionKind};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn seeded_ledger_starts_counters_after_defaults() {
        let ledger = Ledger::with_default_categories();
        assert_eq!(ledger.counters.next_transaction_id, 1);
        assert_eq!(ledger.counters.next_category_id, 9);
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn zero_counters_fall_back_to_defaults() {
        let ledger = Ledger::new(
            Vec::new(),
            Vec::new(),
            IdCounters {
                next_transaction_id: 0,
                next_category_id: 0,
            },
        );
        assert_eq!(ledger.counters, IdCounters::default());
    }

    #[test]
    fn lagging_counters_are_raised_past_existing_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let txn = Transaction::from_draft(41, TransactionDraft::income(5.0, date), Utc::now());
        let ledger = Ledger::new(Category::defaults(), vec![txn], IdCounters::default());
        assert_eq!(ledger.counters.next_transaction_id, 42);
        assert_eq!(ledger.counters.next_category_id, 9);
    }

    #[test]
    fn stale_category_reference_resolves_to_uncategorized() {
        let mut ledger = Ledger::with_default_categories();
        assert_eq!(ledger.category_name(Some(4)), "Food");
        assert_eq!(ledger.category_name(Some(404)), UNCATEGORIZED_LABEL);
        assert_eq!(ledger.category_name(None), UNCATEGORIZED_LABEL);
        ledger.categories.clear();
        assert_eq!(ledger.category_name(Some(4)), UNCATEGORIZED_LABEL);
        assert_eq!(TransactionKind::Income.label(), "Income");
    }

    #[test]
    fn unreadable_entries_still_reserve_their_ids() {
        let mut ledger = Ledger::with_default_categories();
        ledger.unreadable.transactions = vec![serde_json::json!({"id": 17, "type": "transfer"})];
        ledger.unreadable.categories = vec![serde_json::json!({"id": 30})];
        assert!(ledger.reconcile_counters());
        assert_eq!(ledger.counters.next_transaction_id, 18);
        assert_eq!(ledger.counters.next_category_id, 31);
    }

    #[test]
    fn exhausted_counter_allocates_nothing() {
        let mut ledger = Ledger::with_default_categories();
        ledger.counters.next_transaction_id = u64::MAX;
        assert_eq!(ledger.allocate_transaction_id(), None);
        assert_eq!(ledger.counters.next_transaction_id, u64::MAX);
        assert_eq!(ledger.allocate_category_id(), Some(9));
        assert_eq!(ledger.counters.next_category_id, 10);
    }
}

//! Application-state facade tying the ledger to persistence and a clock.

use chrono::NaiveDate;

use crate::core::{
    clock::Clock,
    errors::Result,
    filter::{filter_transactions, FilterCriteria},
    services::{
        BalanceSummary, CategoryService, CategoryTotals, ExportService, MonthlyTotals,
        SummaryService, TransactionService,
    },
};
use crate::domain::{
    Category, CategoryId, Ledger, Transaction, TransactionDraft, TransactionId, TransactionKind,
};
use crate::storage::{self, Record, StorageBackend};

/// Owns the ledger and persists every mutation through the storage backend.
///
/// When a write fails after a mutation the in-memory ledger keeps the change
/// and the persistence error is returned, so callers can warn that the change
/// may be lost on reload.
///
/// A collection is only written once the id counters covering it are stored,
/// so a reload can never hand out an id that was already saved.
pub struct Tracker {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    load_warnings: Vec<String>,
    counters_pending: bool,
}

impl Tracker {
    /// Loads the ledger from `storage`, seeding defaults for absent records.
    pub fn open(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Result<Self> {
        let report = storage::load_ledger(storage.as_ref())?;
        tracing::debug!(
            transactions = report.ledger.transactions.len(),
            categories = report.ledger.categories.len(),
            seeded = report.seeded_defaults,
            "ledger loaded"
        );
        Ok(Self {
            ledger: report.ledger,
            storage,
            clock,
            load_warnings: report.warnings,
            counters_pending: false,
        })
    }

    /// Wraps an existing ledger without reading from `storage`.
    pub fn with_ledger(ledger: Ledger, storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger,
            storage,
            clock,
            load_warnings: Vec::new(),
            counters_pending: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn categories(&self) -> &[Category] {
        CategoryService::list(&self.ledger)
    }

    pub fn transactions(&self) -> &[Transaction] {
        TransactionService::list(&self.ledger)
    }

    pub fn add_category(&mut self, name: &str, kind: TransactionKind, color: &str) -> Result<Category> {
        let category = CategoryService::add(&mut self.ledger, name, kind, color)?;
        self.persist(&[Record::Counters, Record::Categories])?;
        Ok(category)
    }

    /// Deletes a category and clears references to it. Unknown ids do nothing.
    pub fn delete_category(&mut self, id: CategoryId) -> Result<Option<Category>> {
        let Some(removed) = CategoryService::remove(&mut self.ledger, id) else {
            return Ok(None);
        };
        self.persist(&[Record::Transactions, Record::Categories])?;
        Ok(Some(removed))
    }

    /// Records a transaction stamped with the clock's current time.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let created_at = self.clock.now();
        let transaction = TransactionService::add(&mut self.ledger, draft, created_at)?;
        self.persist(&[Record::Counters, Record::Transactions])?;
        Ok(transaction)
    }

    /// Deletes a transaction. Unknown ids do nothing.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Option<Transaction>> {
        let Some(removed) = TransactionService::remove(&mut self.ledger, id) else {
            return Ok(None);
        };
        self.persist(&[Record::Transactions])?;
        Ok(Some(removed))
    }

    /// Writes the full ledger, e.g. to retry after a failed persist.
    pub fn save(&mut self) -> Result<()> {
        storage::save_ledger(self.storage.as_ref(), &self.ledger)?;
        self.counters_pending = false;
        Ok(())
    }

    /// Stores the counters first when asked to or when an earlier attempt
    /// failed, then every requested collection. Collections are skipped while
    /// the counters cannot be stored. Returns the first error.
    fn persist(&mut self, records: &[Record]) -> Result<()> {
        let backend = self.storage.as_ref();
        if self.counters_pending || records.contains(&Record::Counters) {
            if let Err(err) = storage::save_record(backend, &self.ledger, Record::Counters) {
                self.counters_pending = true;
                return Err(err);
            }
            self.counters_pending = false;
        }
        let mut first_error = None;
        for record in records.iter().filter(|record| **record != Record::Counters) {
            if let Err(err) = storage::save_record(backend, &self.ledger, *record) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Transaction> {
        filter_transactions(&self.ledger.transactions, criteria, self.today())
    }

    pub fn balance(&self) -> BalanceSummary {
        SummaryService::balance(&self.ledger.transactions)
    }

    pub fn monthly_totals(&self) -> Vec<MonthlyTotals> {
        SummaryService::by_month(&self.ledger.transactions)
    }

    pub fn expense_breakdown(&self) -> Vec<CategoryTotals> {
        SummaryService::by_expense_category(&self.ledger.transactions, &self.ledger.categories)
    }

    pub fn export_csv(&self) -> Result<String> {
        ExportService::to_csv(&self.ledger.transactions, &self.ledger.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{clock::FixedClock, errors::TrackerError};
    use crate::storage::{MemoryStorage, COUNTERS_KEY, TRANSACTIONS_KEY};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker_with(storage: Arc<MemoryStorage>) -> Tracker {
        Tracker::open(
            Box::new(storage),
            Box::new(FixedClock::on(date(2024, 1, 15))),
        )
        .unwrap()
    }

    #[test]
    fn add_transaction_persists_and_stamps_creation_time() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        let txn = tracker
            .add_transaction(TransactionDraft::expense(20.0, date(2024, 1, 14)))
            .unwrap();
        assert_eq!(txn.created_at, FixedClock::on(date(2024, 1, 15)).now());
        assert!(storage.contains(TRANSACTIONS_KEY));

        let reloaded = tracker_with(storage);
        assert_eq!(reloaded.transactions(), &[txn]);
    }

    #[test]
    fn failed_persist_keeps_in_memory_change() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        storage.set_reject_writes(true);

        let err = tracker
            .add_transaction(TransactionDraft::income(5.0, date(2024, 1, 1)))
            .expect_err("write must fail");
        assert!(err.is_persistence());
        assert_eq!(tracker.transactions().len(), 1);

        storage.set_reject_writes(false);
        tracker.save().unwrap();
        assert_eq!(tracker_with(storage).transactions().len(), 1);
    }

    #[test]
    fn validation_failure_does_not_write() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        let err = tracker
            .add_transaction(TransactionDraft::income(-1.0, date(2024, 1, 1)))
            .expect_err("negative amount must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(!storage.contains(TRANSACTIONS_KEY));
    }

    #[test]
    fn deleting_unknown_ids_is_silent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        assert!(tracker.delete_transaction(77).unwrap().is_none());
        assert!(tracker.delete_category(77).unwrap().is_none());
        assert!(!storage.contains(TRANSACTIONS_KEY));
    }

    #[test]
    fn filter_uses_the_clock_for_relative_ranges() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage);
        tracker
            .add_transaction(TransactionDraft::expense(3.0, date(2024, 1, 15)))
            .unwrap();
        tracker
            .add_transaction(TransactionDraft::expense(4.0, date(2024, 1, 13)))
            .unwrap();
        let criteria =
            FilterCriteria::default().with_date_range(crate::core::filter::DateRange::Today);
        let view = tracker.filter(&criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].amount, 3.0);
    }

    #[test]
    fn collections_wait_for_the_counters_to_be_stored() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        storage.reject_writes_to(COUNTERS_KEY, true);

        let err = tracker
            .add_transaction(TransactionDraft::income(5.0, date(2024, 1, 1)))
            .expect_err("counter write must fail");
        assert!(err.is_persistence());
        assert!(!storage.contains(TRANSACTIONS_KEY));

        storage.reject_writes_to(COUNTERS_KEY, false);
        assert!(tracker.delete_transaction(1).unwrap().is_some());
        assert!(storage.contains(COUNTERS_KEY));

        let mut reloaded = tracker_with(storage);
        let next = reloaded
            .add_transaction(TransactionDraft::income(6.0, date(2024, 1, 2)))
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn collection_failure_still_attempts_the_remaining_records() {
        let storage = Arc::new(MemoryStorage::new());
        let mut tracker = tracker_with(storage.clone());
        let category = tracker
            .add_category("Pets", TransactionKind::Expense, "#aa7744")
            .unwrap();
        storage.reject_writes_to(TRANSACTIONS_KEY, true);

        let err = tracker
            .delete_category(category.id)
            .expect_err("transactions write must fail");
        assert!(err.is_persistence());

        storage.reject_writes_to(TRANSACTIONS_KEY, false);
        let reloaded = tracker_with(storage);
        assert!(reloaded.ledger().category(category.id).is_none());
    }
}

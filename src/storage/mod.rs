//! Persistence gateway: three named records behind a synchronous key-value store.

pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::core::errors::{Result, TrackerError};
use crate::domain::{Category, IdCounters, Ledger, Transaction, UnreadableRecords};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub const TRANSACTIONS_KEY: &str = "financeTrackerTransactions";
pub const CATEGORIES_KEY: &str = "financeTrackerCategories";
pub const COUNTERS_KEY: &str = "financeTrackerIds";

/// Abstraction over synchronous key-value backends holding serialized records.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored text for `key`, or `None` when nothing was saved yet.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Shared handles forward to the backend they point at.
impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Outcome of loading the ledger from a backend.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    /// Records that were skipped or repaired while decoding.
    pub warnings: Vec<String>,
    /// `true` when no category record existed and the defaults were seeded.
    pub seeded_defaults: bool,
}

/// Reads all three records, falling back to defaults for absent ones.
///
/// Individual entries that fail to decode are kept aside verbatim and
/// reported as warnings; a record blob that is not a JSON array is an error.
pub fn load_ledger(storage: &dyn StorageBackend) -> Result<LoadReport> {
    let mut warnings = Vec::new();
    let mut unreadable = UnreadableRecords::default();

    let transactions: Vec<Transaction> = match storage.read(TRANSACTIONS_KEY)? {
        Some(raw) => decode_records(
            TRANSACTIONS_KEY,
            &raw,
            &mut unreadable.transactions,
            &mut warnings,
        )?,
        None => Vec::new(),
    };

    let (categories, seeded_defaults) = match storage.read(CATEGORIES_KEY)? {
        Some(raw) => (
            decode_records(CATEGORIES_KEY, &raw, &mut unreadable.categories, &mut warnings)?,
            false,
        ),
        None => (Category::defaults(), true),
    };

    let counters = match storage.read(COUNTERS_KEY)? {
        Some(raw) => serde_json::from_str::<IdCounters>(&raw).unwrap_or_else(|err| {
            warnings.push(format!("{COUNTERS_KEY}: unreadable id counters ({err}); using defaults"));
            IdCounters::default()
        }),
        None => IdCounters::default(),
    };

    let mut ledger = Ledger {
        categories,
        transactions,
        counters: counters.or_defaults(),
        unreadable,
    };
    if ledger.reconcile_counters() {
        warnings.push(format!(
            "{COUNTERS_KEY}: id counters lagged behind stored records and were advanced"
        ));
    }

    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    Ok(LoadReport {
        ledger,
        warnings,
        seeded_defaults,
    })
}

/// One of the three persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Transactions,
    Categories,
    Counters,
}

impl Record {
    pub const ALL: [Record; 3] = [Record::Counters, Record::Transactions, Record::Categories];

    pub fn key(self) -> &'static str {
        match self {
            Record::Transactions => TRANSACTIONS_KEY,
            Record::Categories => CATEGORIES_KEY,
            Record::Counters => COUNTERS_KEY,
        }
    }
}

/// Writes one record of `ledger`. Unreadable entries are appended unchanged.
pub fn save_record(storage: &dyn StorageBackend, ledger: &Ledger, record: Record) -> Result<()> {
    match record {
        Record::Transactions => write_record(
            storage,
            TRANSACTIONS_KEY,
            &with_unreadable(&ledger.transactions, &ledger.unreadable.transactions)?,
        ),
        Record::Categories => write_record(
            storage,
            CATEGORIES_KEY,
            &with_unreadable(&ledger.categories, &ledger.unreadable.categories)?,
        ),
        Record::Counters => write_record(storage, COUNTERS_KEY, &ledger.counters),
    }
}

/// Writes every record, counters first. Stops at the first failure.
pub fn save_ledger(storage: &dyn StorageBackend, ledger: &Ledger) -> Result<()> {
    for record in Record::ALL {
        save_record(storage, ledger, record)?;
    }
    Ok(())
}

fn with_unreadable<T: Serialize>(records: &[T], unreadable: &[Value]) -> Result<Vec<Value>> {
    let mut values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    values.extend(unreadable.iter().cloned());
    Ok(values)
}

fn write_record<T: Serialize + ?Sized>(storage: &dyn StorageBackend, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.write(key, &json)
}

fn decode_records<T: DeserializeOwned>(
    key: &str,
    raw: &str,
    unreadable: &mut Vec<Value>,
    warnings: &mut Vec<String>,
) -> Result<Vec<T>> {
    let values: Vec<Value> = serde_json::from_str(raw)
        .map_err(|err| TrackerError::Persistence(format!("{key}: expected a JSON array ({err})")))?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value.clone()) {
            Ok(record) => records.push(record),
            Err(err) => {
                warnings.push(format!("{key}[{index}]: kept unreadable record as-is ({err})"));
                unreadable.push(value);
            }
        }
    }
    Ok(records)
}

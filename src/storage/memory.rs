use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use crate::core::errors::{Result, TrackerError};

use super::StorageBackend;

/// In-process store, handy for tests and embedding.
///
/// Writes can be made to fail on demand to exercise quota-style errors.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
    rejected_keys: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled every `write` fails and leaves stored records untouched.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Like [`set_reject_writes`](Self::set_reject_writes), for a single key.
    pub fn reject_writes_to(&self, key: &str, reject: bool) {
        if let Ok(mut keys) = self.rejected_keys.lock() {
            if reject {
                keys.insert(key.to_string());
            } else {
                keys.remove(key);
            }
        }
    }

    fn rejects(&self, key: &str) -> bool {
        self.reject_writes.load(Ordering::SeqCst)
            || self
                .rejected_keys
                .lock()
                .map(|keys| keys.contains(key))
                .unwrap_or(false)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records
            .lock()
            .map(|records| records.contains_key(key))
            .unwrap_or(false)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let records = self
            .records
            .lock()
            .map_err(|_| TrackerError::Persistence("memory store lock poisoned".into()))?;
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.rejects(key) {
            return Err(TrackerError::Persistence(format!(
                "storage quota exceeded while writing `{key}`"
            )));
        }
        let mut records = self
            .records
            .lock()
            .map_err(|_| TrackerError::Persistence("memory store lock poisoned".into()))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

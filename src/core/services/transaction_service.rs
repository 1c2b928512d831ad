//! Business logic helpers for managing transactions.

use chrono::{DateTime, Utc};

use crate::core::errors::{Result, TrackerError};
use crate::domain::{Ledger, Transaction, TransactionDraft, TransactionId};

/// Provides validated create/delete helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates the draft, assigns the next id and appends the record.
    pub fn add(
        ledger: &mut Ledger,
        draft: TransactionDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Transaction> {
        Self::validate_amount(draft.amount)?;
        let id = ledger
            .allocate_transaction_id()
            .ok_or_else(|| TrackerError::Persistence("transaction id counter exhausted".into()))?;
        let transaction = Transaction::from_draft(id, draft, created_at);
        ledger.transactions.push(transaction.clone());
        tracing::debug!(id, kind = %transaction.kind, "transaction added");
        Ok(transaction)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn remove(ledger: &mut Ledger, id: TransactionId) -> Option<Transaction> {
        let index = ledger.transactions.iter().position(|txn| txn.id == id)?;
        let removed = ledger.transactions.remove(index);
        tracing::debug!(id, "transaction removed");
        Some(removed)
    }

    /// Returns the ledger's transactions in insertion order.
    pub fn list(ledger: &Ledger) -> &[Transaction] {
        &ledger.transactions
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(TrackerError::Validation(
                "amount must be a finite number".into(),
            ));
        }
        if amount < 0.0 {
            return Err(TrackerError::Validation(
                "amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

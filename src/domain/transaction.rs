//! Domain models for recorded income and expense transactions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{category::CategoryId, common::*};

pub type TransactionId = u64;

/// A single recorded income or expense event.
///
/// `amount` is always a magnitude; the direction comes from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialises a draft with the identity assigned by the store.
    pub fn from_draft(id: TransactionId, draft: TransactionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            amount: draft.amount,
            description: draft.description,
            category_id: draft.category_id,
            date: draft.date,
            notes: draft.notes,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount counted by aggregations. Corrupt amounts count as zero.
    pub fn contribution(&self) -> f64 {
        if self.amount.is_finite() && self.amount >= 0.0 {
            self.amount
        } else {
            0.0
        }
    }

    /// Amount with the sign implied by the transaction kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.contribution(),
            TransactionKind::Expense => -self.contribution(),
        }
    }
}

/// Accepts any JSON value for an amount. Numbers and numeric strings are kept;
/// `null` and anything else become NaN, which `contribution()` counts as zero.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    Ok(amount)
}

impl Identifiable for Transaction {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {:.2} on {}]", self.id, self.kind, self.amount, self.date)
    }
}

/// User-supplied fields of a transaction before the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub date: NaiveDate,
    pub notes: String,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, date: NaiveDate) -> Self {
        Self {
            kind,
            amount,
            description: String::new(),
            category_id: None,
            date,
            notes: String::new(),
        }
    }

    pub fn income(amount: f64, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, amount, date)
    }

    pub fn expense(amount: f64, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, amount, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

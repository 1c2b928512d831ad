//! Filtering and ordering of the transaction list.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, Transaction, TransactionKind};

/// Restricts the view to one transaction kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionKind::Income,
            TypeFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(format!("unknown type filter `{other}`")),
        }
    }
}

/// Calendar window relative to today.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl DateRange {
    /// Tests `date` against the window anchored at `today`.
    ///
    /// Weeks start on Sunday and run through `today` inclusive.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::ThisWeek => {
                let offset = u64::from(today.weekday().num_days_from_sunday());
                let start = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
                date >= start && date <= today
            }
            DateRange::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            DateRange::ThisYear => date.year() == today.year(),
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" | "thisweek" => Ok(DateRange::ThisWeek),
            "month" | "thismonth" => Ok(DateRange::ThisMonth),
            "year" | "thisyear" => Ok(DateRange::ThisYear),
            other => Err(format!("unknown date range `{other}`")),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateRange::All => "all time",
            DateRange::Today => "today",
            DateRange::ThisWeek => "this week",
            DateRange::ThisMonth => "this month",
            DateRange::ThisYear => "this year",
        };
        f.write_str(label)
    }
}

/// Options controlling which transactions appear in a derived view.
///
/// The default value matches everything ("clear filters").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, rename = "type")]
    pub kind: TypeFilter,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub search_text: String,
}

impl FilterCriteria {
    pub fn with_kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn matches(&self, txn: &Transaction, needle: &str, today: NaiveDate) -> bool {
        if !self.kind.matches(txn.kind) {
            return false;
        }
        if let Some(category_id) = self.category_id {
            if txn.category_id != Some(category_id) {
                return false;
            }
        }
        if !self.date_range.contains(txn.date, today) {
            return false;
        }
        needle.is_empty()
            || txn.description.to_lowercase().contains(needle)
            || txn.notes.to_lowercase().contains(needle)
    }
}

/// Returns the transactions matching every criterion, newest date first.
///
/// Equal dates keep their insertion order. The input is never modified.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let needle = criteria.search_text.to_lowercase();
    let mut view: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| criteria.matches(txn, &needle, today))
        .collect();
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

//! Balance totals and the grouped summaries behind the dashboard views.

use std::{fmt, ops::Add};

use chrono::Datelike;
use serde::{Serialize, Serializer};

use crate::domain::{
    Category, NamedEntity, Transaction, TransactionKind, UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL,
};

/// Income, expense and net totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Add for BalanceSummary {
    type Output = BalanceSummary;

    fn add(self, other: BalanceSummary) -> BalanceSummary {
        BalanceSummary {
            income: self.income + other.income,
            expenses: self.expenses + other.expenses,
            balance: self.balance + other.balance,
        }
    }
}

/// Calendar month bucket. Displays as `YYYY-M` with an unpadded month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub month_key: MonthKey,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category_name: String,
    pub amount: f64,
    pub color: String,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums income and expenses; balance is income minus expenses.
    pub fn balance<'a, I>(transactions: I) -> BalanceSummary
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expenses) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expenses), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.contribution(), expenses),
                    TransactionKind::Expense => (income, expenses + txn.contribution()),
                });
        BalanceSummary {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Income and expense per calendar month, oldest month first.
    pub fn by_month<'a, I>(transactions: I) -> Vec<MonthlyTotals>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut months: Vec<MonthlyTotals> = Vec::new();
        for txn in transactions {
            let key = MonthKey {
                year: txn.date.year(),
                month: txn.date.month(),
            };
            let index = match months.iter().position(|entry| entry.month_key == key) {
                Some(index) => index,
                None => {
                    months.push(MonthlyTotals {
                        month_key: key,
                        income: 0.0,
                        expense: 0.0,
                    });
                    months.len() - 1
                }
            };
            let entry = &mut months[index];
            match txn.kind {
                TransactionKind::Income => entry.income += txn.contribution(),
                TransactionKind::Expense => entry.expense += txn.contribution(),
            }
        }
        months.sort_by_key(|entry| entry.month_key);
        months
    }

    /// Expense totals per category name in order of first appearance.
    ///
    /// Missing or stale category references are grouped as "Uncategorized".
    pub fn by_expense_category<'a, I>(transactions: I, categories: &[Category]) -> Vec<CategoryTotals>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut buckets: Vec<CategoryTotals> = Vec::new();
        for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
            let category = txn
                .category_id
                .and_then(|id| categories.iter().find(|category| category.id == id));
            let (name, color) = match category {
                Some(category) => (category.name(), category.color.as_str()),
                None => (UNCATEGORIZED_LABEL, UNCATEGORIZED_COLOR),
            };
            match buckets.iter_mut().find(|bucket| bucket.category_name == name) {
                Some(bucket) => bucket.amount += txn.contribution(),
                None => buckets.push(CategoryTotals {
                    category_name: name.to_string(),
                    amount: txn.contribution(),
                    color: color.to_string(),
                }),
            }
        }
        buckets
    }

    /// Share of `amount` in `total`, as a rounded whole percentage.
    pub fn percentage(amount: f64, total: f64) -> u32 {
        if total <= 0.0 || !total.is_finite() {
            return 0;
        }
        ((amount / total) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

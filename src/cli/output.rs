//! Text rendering of tracker views for the terminal.

use std::fmt;

use colored::Colorize;

use crate::core::services::{BalanceSummary, CategoryTotals, ExportService, MonthlyTotals, SummaryService};
use crate::domain::{Category, Displayable, Ledger, Transaction, TransactionKind};

const DESCRIPTION_WIDTH: usize = 28;
const CATEGORY_WIDTH: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Muted,
    Positive,
    Negative,
    Success,
    Warning,
}

/// Formats messages and tables, optionally with ANSI colors.
pub struct Output {
    color: bool,
    currency_symbol: String,
}

impl Output {
    pub fn new(color: bool, currency_symbol: impl Into<String>) -> Self {
        Self {
            color,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn print(&self, text: impl fmt::Display) {
        println!("{text}");
    }

    pub fn success(&self, message: impl fmt::Display) {
        println!("{}", self.paint(Style::Success, format!("[ok] {message}")));
    }

    pub fn info(&self, message: impl fmt::Display) {
        println!("{message}");
    }

    pub fn warning(&self, message: impl fmt::Display) {
        eprintln!("{}", self.paint(Style::Warning, format!("Warning: {message}")));
    }

    /// Plain money amount with two decimals, e.g. `$12.50`.
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    /// Money amount prefixed and colored by transaction direction.
    pub fn signed_money(&self, kind: TransactionKind, amount: f64) -> String {
        match kind {
            TransactionKind::Income => {
                self.paint(Style::Positive, format!("+{}", self.money(amount)))
            }
            TransactionKind::Expense => {
                self.paint(Style::Negative, format!("-{}", self.money(amount)))
            }
        }
    }

    pub fn header(&self, title: impl fmt::Display) -> String {
        self.paint(Style::Header, format!("=== {title} ==="))
    }

    pub fn transactions_table(&self, ledger: &Ledger, view: &[&Transaction]) -> String {
        if view.is_empty() {
            return self.paint(Style::Muted, "No transactions found.");
        }
        let mut lines = vec![format!(
            "{:>4}  {:<13} {:<dw$} {:<cw$} {:<8} {:>12}",
            "ID",
            "Date",
            "Description",
            "Category",
            "Type",
            "Amount",
            dw = DESCRIPTION_WIDTH,
            cw = CATEGORY_WIDTH,
        )];
        for txn in view {
            let amount = format!(
                "{}{}",
                if txn.is_income() { "+" } else { "-" },
                self.money(txn.contribution())
            );
            let amount = format!("{amount:>12}");
            let amount = match txn.kind {
                TransactionKind::Income => self.paint(Style::Positive, amount),
                TransactionKind::Expense => self.paint(Style::Negative, amount),
            };
            lines.push(format!(
                "{:>4}  {:<13} {:<dw$} {:<cw$} {:<8} {}",
                txn.id,
                ExportService::short_date(txn.date),
                truncate(&txn.description, DESCRIPTION_WIDTH),
                truncate(ledger.category_name(txn.category_id), CATEGORY_WIDTH),
                txn.kind.label(),
                amount,
                dw = DESCRIPTION_WIDTH,
                cw = CATEGORY_WIDTH,
            ));
        }
        lines.join("\n")
    }

    pub fn balance(&self, summary: &BalanceSummary) -> String {
        let style = if summary.balance >= 0.0 {
            Style::Positive
        } else {
            Style::Negative
        };
        let mut balance = self.money(summary.balance.abs());
        if summary.balance < 0.0 {
            balance.push_str(" (deficit)");
        }
        [
            format!("Balance:  {}", self.paint(style, balance)),
            format!("Income:   {}", self.money(summary.income)),
            format!("Expenses: {}", self.money(summary.expenses)),
        ]
        .join("\n")
    }

    pub fn monthly(&self, months: &[MonthlyTotals]) -> String {
        if months.is_empty() {
            return self.paint(Style::Muted, "No transactions recorded yet.");
        }
        let mut lines = vec![format!("{:<8} {:>14} {:>14}", "Month", "Income", "Expenses")];
        for entry in months {
            let income = format!("{:>14}", self.money(entry.income));
            let expense = format!("{:>14}", self.money(entry.expense));
            lines.push(format!(
                "{:<8} {} {}",
                entry.month_key.to_string(),
                self.paint(Style::Positive, income),
                self.paint(Style::Negative, expense),
            ));
        }
        lines.join("\n")
    }

    pub fn breakdown(&self, buckets: &[CategoryTotals]) -> String {
        if buckets.is_empty() {
            return self.paint(Style::Muted, "No expenses recorded yet.");
        }
        let total: f64 = buckets.iter().map(|bucket| bucket.amount).sum();
        buckets
            .iter()
            .map(|bucket| {
                format!(
                    "{:<cw$} {:>12} {:>5}%  {}",
                    truncate(&bucket.category_name, CATEGORY_WIDTH),
                    self.money(bucket.amount),
                    SummaryService::percentage(bucket.amount, total),
                    self.paint(Style::Muted, &bucket.color),
                    cw = CATEGORY_WIDTH,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn categories(&self, categories: &[Category]) -> String {
        if categories.is_empty() {
            return self.paint(Style::Muted, "No categories defined.");
        }
        categories
            .iter()
            .map(|category| {
                format!(
                    "[{:>3}] {} {}",
                    category.id,
                    category.display_label(),
                    self.paint(Style::Muted, &category.color)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paint(&self, style: Style, text: impl fmt::Display) -> String {
        let text = text.to_string();
        if !self.color {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Muted => text.dimmed().to_string(),
            Style::Positive | Style::Success => text.green().to_string(),
            Style::Negative => text.red().to_string(),
            Style::Warning => text.yellow().to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionDraft;
    use chrono::{NaiveDate, Utc};

    fn plain() -> Output {
        Output::new(false, "$")
    }

    #[test]
    fn table_resolves_categories_and_signs_amounts() {
        let mut ledger = Ledger::with_default_categories();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        ledger.transactions.push(Transaction::from_draft(
            1,
            TransactionDraft::expense(42.0, date)
                .with_description("Groceries")
                .with_category(4),
            Utc::now(),
        ));
        ledger.transactions.push(Transaction::from_draft(
            2,
            TransactionDraft::income(1000.0, date).with_category(99),
            Utc::now(),
        ));
        let view: Vec<&Transaction> = ledger.transactions.iter().collect();
        let table = plain().transactions_table(&ledger, &view);
        assert!(table.contains("Jan 5, 2024"));
        assert!(table.contains("Food"));
        assert!(table.contains("-$42.00"));
        assert!(table.contains("Uncategorized"));
        assert!(table.contains("+$1000.00"));
    }

    #[test]
    fn negative_balance_shows_magnitude_and_marker() {
        let text = plain().balance(&BalanceSummary {
            income: 10.0,
            expenses: 25.5,
            balance: -15.5,
        });
        assert!(text.contains("Balance:  $15.50 (deficit)"));
        assert!(text.contains("Expenses: $25.50"));
    }

    #[test]
    fn breakdown_reports_percent_share() {
        let text = plain().breakdown(&[
            CategoryTotals {
                category_name: "Food".into(),
                amount: 75.0,
                color: "#fd7e14".into(),
            },
            CategoryTotals {
                category_name: "Utilities".into(),
                amount: 25.0,
                color: "#6c757d".into(),
            },
        ]);
        assert!(text.contains("75%"));
        assert!(text.contains("25%"));
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}

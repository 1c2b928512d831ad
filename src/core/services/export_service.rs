//! CSV export of the full transaction list.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::core::errors::{Result, TrackerError};
use crate::domain::{Category, Transaction, UNCATEGORIZED_LABEL};

const HEADER: [&str; 6] = ["Date", "Type", "Description", "Category", "Amount", "Notes"];
const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";
const FILE_PREFIX: &str = "finance-tracker";

pub struct ExportService;

impl ExportService {
    /// Renders every transaction, in store order, as a CSV table.
    ///
    /// The header row is bare. In data rows text columns are always quoted and
    /// `Amount` is written as a bare number.
    pub fn to_csv(transactions: &[Transaction], categories: &[Category]) -> Result<String> {
        let mut header = HEADER.join(",");
        header.push('\n');
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::NonNumeric)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(header.into_bytes());
        for txn in transactions {
            let category = txn
                .category_id
                .and_then(|id| categories.iter().find(|category| category.id == id))
                .map_or(UNCATEGORIZED_LABEL, |category| category.name.as_str());
            writer.write_record([
                Self::short_date(txn.date).as_str(),
                txn.kind.as_str(),
                txn.description.as_str(),
                category,
                txn.amount.to_string().as_str(),
                txn.notes.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| TrackerError::Export(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| TrackerError::Export(err.to_string()))
    }

    /// Formats a date the way the export shows it, e.g. `Jan 5, 2024`.
    pub fn short_date(date: NaiveDate) -> String {
        date.format(SHORT_DATE_FORMAT).to_string()
    }

    /// Suggested file name for an export made on `today`.
    pub fn default_file_name(today: NaiveDate) -> String {
        format!("{FILE_PREFIX}-{}.csv", today.format("%Y-%m-%d"))
    }
}

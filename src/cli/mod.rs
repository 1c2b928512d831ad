//! Command-line front end: parses a command, runs it against the tracker, prints the result.

pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::core::{
    errors::TrackerError,
    filter::{DateRange, TypeFilter},
};
use crate::domain::{CategoryId, TransactionId, TransactionKind};
use crate::utils::build_info::LONG_VERSION;

pub use context::CommandContext;

pub type CommandResult = Result<(), CommandError>;

/// Errors surfaced to the terminal user.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Track income and expenses from the terminal.
#[derive(Parser, Debug)]
#[command(name = "finance_tracker", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Directory holding configuration and data [default: $FINANCE_TRACKER_HOME or ~/.finance_tracker]
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new income or expense.
    Add(AddArgs),
    /// Delete a transaction by id.
    Delete {
        id: TransactionId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// List transactions, newest first.
    List(ListArgs),
    /// Show total income, expenses and balance.
    Balance,
    /// Show income vs. expenses per month.
    Monthly,
    /// Show expenses per category.
    Breakdown,
    /// Manage categories.
    #[command(subcommand)]
    Categories(CategoryCommand),
    /// Show or change preferences.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Export all transactions to a CSV file.
    Export {
        /// Destination file [default: ./finance-tracker-<today>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// `income` or `expense`.
    #[arg(long = "type", short = 't')]
    pub kind: TransactionKind,

    #[arg(long, short = 'a', allow_negative_numbers = true)]
    pub amount: f64,

    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Category id (see `categories list`).
    #[arg(long, short = 'c')]
    pub category: Option<CategoryId>,

    /// Transaction date as YYYY-MM-DD [default: today]
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, short = 'n', default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// all, income or expense.
    #[arg(long = "type", short = 't', default_value = "all")]
    pub kind: TypeFilter,

    /// Only show this category id.
    #[arg(long, short = 'c')]
    pub category: Option<CategoryId>,

    /// all, today, week, month or year.
    #[arg(long, short = 'r', default_value = "all")]
    pub range: DateRange,

    /// Case-insensitive text to find in description or notes.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List categories in creation order.
    List,
    /// Create a category.
    Add {
        name: String,
        /// `income` or `expense`.
        #[arg(long = "type", short = 't')]
        kind: TransactionKind,
        /// Display color, e.g. `#4361ee`.
        #[arg(long, default_value = "#4361ee")]
        color: String,
    },
    /// Delete a category; its transactions become uncategorized.
    Delete {
        id: CategoryId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print every setting.
    Show,
    /// Change one setting: currency_symbol, color_output, confirm_deletes or data_dir.
    Set { key: String, value: String },
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> CommandResult {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> CommandResult {
    let mut context = CommandContext::open(cli.home, cli.plain)?;
    commands::dispatch(&mut context, cli.command)
}

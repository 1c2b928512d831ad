use std::{fs, path::PathBuf};

use crate::cli::{CommandContext, CommandError, CommandResult};
use crate::core::services::ExportService;

pub fn handle_balance(context: &mut CommandContext) -> CommandResult {
    let output = &context.output;
    output.print(output.header("Balance"));
    output.print(output.balance(&context.tracker.balance()));
    Ok(())
}

pub fn handle_monthly(context: &mut CommandContext) -> CommandResult {
    let output = &context.output;
    output.print(output.header("Income vs. Expenses"));
    output.print(output.monthly(&context.tracker.monthly_totals()));
    Ok(())
}

pub fn handle_breakdown(context: &mut CommandContext) -> CommandResult {
    let output = &context.output;
    output.print(output.header("Expenses by Category"));
    output.print(output.breakdown(&context.tracker.expense_breakdown()));
    Ok(())
}

/// Writes every transaction as CSV in the order they were recorded.
pub fn handle_export(context: &mut CommandContext, destination: Option<PathBuf>) -> CommandResult {
    if context.tracker.transactions().is_empty() {
        context.output.info("No transactions to export");
        return Ok(());
    }
    let csv = context.tracker.export_csv()?;
    let path = destination
        .unwrap_or_else(|| PathBuf::from(ExportService::default_file_name(context.tracker.today())));
    fs::write(&path, csv).map_err(|source| CommandError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "transactions exported");
    context.output.success(format!(
        "Exported {} transactions to {}",
        context.tracker.transactions().len(),
        path.display()
    ));
    Ok(())
}

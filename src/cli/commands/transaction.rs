use crate::cli::{AddArgs, CommandContext, CommandResult, ListArgs};
use crate::core::{errors::TrackerError, filter::FilterCriteria};
use crate::domain::{TransactionDraft, TransactionId};

const DELETE_PROMPT: &str = "Are you sure you want to delete this transaction?";

pub fn handle_add(context: &mut CommandContext, args: AddArgs) -> CommandResult {
    if let Some(category_id) = args.category {
        if context.tracker.ledger().category(category_id).is_none() {
            return Err(TrackerError::NotFound(format!("category {category_id}")).into());
        }
    }
    let date = args.date.unwrap_or_else(|| context.tracker.today());
    let mut draft = TransactionDraft::new(args.kind, args.amount, date)
        .with_description(args.description)
        .with_notes(args.notes);
    if let Some(category_id) = args.category {
        draft = draft.with_category(category_id);
    }

    let result = context.tracker.add_transaction(draft);
    let transaction = context.persisted(result)?;
    context.output.success(format!(
        "Recorded {} #{}: {}",
        transaction.kind.as_str(),
        transaction.id,
        context.output.signed_money(transaction.kind, transaction.amount)
    ));
    Ok(())
}

pub fn handle_delete(context: &mut CommandContext, id: TransactionId, yes: bool) -> CommandResult {
    if context.tracker.ledger().transaction(id).is_none() {
        context
            .output
            .info(format!("No transaction with id {id}; nothing deleted."));
        return Ok(());
    }
    if !context.confirm(DELETE_PROMPT, yes)? {
        context.output.info("Deletion cancelled.");
        return Ok(());
    }
    let result = context.tracker.delete_transaction(id);
    if context.persisted(result)?.is_some() {
        context.output.success(format!("Deleted transaction #{id}"));
    }
    Ok(())
}

pub fn handle_list(context: &mut CommandContext, args: ListArgs) -> CommandResult {
    let mut criteria = FilterCriteria::default()
        .with_kind(args.kind)
        .with_date_range(args.range)
        .with_search(args.search);
    if let Some(category_id) = args.category {
        criteria = criteria.with_category(category_id);
    }
    let view = context.tracker.filter(&criteria);
    context
        .output
        .print(context.output.transactions_table(context.tracker.ledger(), &view));
    Ok(())
}

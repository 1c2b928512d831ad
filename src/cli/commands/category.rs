use crate::cli::{CommandContext, CommandResult};
use crate::domain::{CategoryId, Displayable, TransactionKind};

const DELETE_PROMPT: &str = "Are you sure you want to delete this category? \
Transactions using this category will be set to uncategorized.";

pub fn handle_list(context: &mut CommandContext) -> CommandResult {
    context.output.print(context.output.header("Categories"));
    context
        .output
        .print(context.output.categories(context.tracker.categories()));
    Ok(())
}

pub fn handle_add(
    context: &mut CommandContext,
    name: &str,
    kind: TransactionKind,
    color: &str,
) -> CommandResult {
    let result = context.tracker.add_category(name, kind, color);
    let category = context.persisted(result)?;
    context.output.success(format!(
        "Added category #{}: {}",
        category.id,
        category.display_label()
    ));
    Ok(())
}

pub fn handle_delete(context: &mut CommandContext, id: CategoryId, yes: bool) -> CommandResult {
    if context.tracker.ledger().category(id).is_none() {
        context
            .output
            .info(format!("No category with id {id}; nothing deleted."));
        return Ok(());
    }
    if !context.confirm(DELETE_PROMPT, yes)? {
        context.output.info("Deletion cancelled.");
        return Ok(());
    }
    let result = context.tracker.delete_category(id);
    if let Some(category) = context.persisted(result)? {
        context
            .output
            .success(format!("Deleted category #{id}: {}", category.display_label()));
    }
    Ok(())
}

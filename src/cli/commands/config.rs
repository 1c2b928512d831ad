use crate::cli::{CommandContext, CommandResult};

pub fn handle_show(context: &mut CommandContext) -> CommandResult {
    let output = &context.output;
    output.print(output.header("Configuration"));
    for (key, value) in context.config.entries() {
        output.print(format!("{key:<16} = {value}"));
    }
    output.info(format!("File: {}", context.config_manager.path().display()));
    Ok(())
}

/// Applies one setting and saves the file. Takes effect on the next command.
pub fn handle_set(context: &mut CommandContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    tracing::debug!(key, "configuration updated");
    context.config = updated;
    context.output.success(format!("Set {key}"));
    Ok(())
}

pub mod category;
pub mod config;
pub mod report;
pub mod transaction;

use crate::cli::{CategoryCommand, Command, CommandContext, CommandResult, ConfigCommand};

/// Routes a parsed command to its handler.
pub fn dispatch(context: &mut CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Add(args) => transaction::handle_add(context, args),
        Command::Delete { id, yes } => transaction::handle_delete(context, id, yes),
        Command::List(args) => transaction::handle_list(context, args),
        Command::Balance => report::handle_balance(context),
        Command::Monthly => report::handle_monthly(context),
        Command::Breakdown => report::handle_breakdown(context),
        Command::Config(action) => match action {
            ConfigCommand::Show => config::handle_show(context),
            ConfigCommand::Set { key, value } => config::handle_set(context, &key, &value),
        },
        Command::Export { output } => report::handle_export(context, output),
        Command::Categories(action) => match action {
            CategoryCommand::List => category::handle_list(context),
            CategoryCommand::Add { name, kind, color } => {
                category::handle_add(context, &name, kind, &color)
            }
            CategoryCommand::Delete { id, yes } => category::handle_delete(context, id, yes),
        },
    }
}

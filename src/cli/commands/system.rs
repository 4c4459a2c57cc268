use giftbook_config::model::KEYS;

use crate::cli::args::{did_you_mean, ParsedArgs};
use crate::cli::context::AppContext;
use crate::cli::registry::CommandEntry;
use crate::cli::CommandResult;
use crate::errors::CliError;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config show | config set <key> <value>",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

fn cmd_config(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&[])?;
    let positionals = args.positionals();
    match positionals.first().map(|action| action.to_lowercase()).as_deref() {
        None | Some("show") => {
            context.formatter.print_header("Configuration");
            context.formatter.print_two_column(&context.config.entries());
            context.formatter.print_detail(format!(
                "file: {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        Some("set") => {
            let (Some(key), Some(_)) = (positionals.get(1), positionals.get(2)) else {
                return Err(CliError::Input(format!(
                    "usage: config set <key> <value>; keys: {}",
                    KEYS.join(", ")
                )));
            };
            let value = positionals[2..].join(" ");
            if !KEYS.contains(&key.as_str()) {
                let hint = did_you_mean(key, KEYS.iter().copied())
                    .map(|best| format!(" Did you mean `{best}`?"))
                    .unwrap_or_default();
                return Err(CliError::Input(format!("unknown config key `{key}`.{hint}")));
            }
            context.config.set(key, value.trim())?;
            context.persist_config()?;
            context
                .formatter
                .print_success(format!("{key} set to {}", value.trim()));
            Ok(())
        }
        Some(other) => Err(CliError::Input(format!(
            "unknown config action `{other}`; use `show` or `set`"
        ))),
    }
}

fn cmd_version(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&[])?;
    let meta = build_info::current();
    context
        .formatter
        .print_header(format!("Giftbook {}", meta.version));
    context.formatter.print_two_column(&meta.rows());
    Ok(())
}

fn cmd_help(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    if let Some(name) = args.positional(0).map(str::to_lowercase) {
        let Some(entry) = context.command(&name) else {
            let hint = did_you_mean(&name, context.registry.names())
                .map(|best| format!(" Did you mean `{best}`?"))
                .unwrap_or_default();
            return Err(CliError::Input(format!("unknown command `{name}`.{hint}")));
        };
        context.formatter.print_header(entry.name);
        context.formatter.print_info(entry.description);
        context.formatter.print_detail(format!("usage: {}", entry.usage));
        return Ok(());
    }

    context.formatter.print_header("Giftbook commands");
    let width = context
        .registry
        .names()
        .map(str::len)
        .max()
        .unwrap_or(0);
    for entry in context.registry.list() {
        context.formatter.print_info(format!(
            "  {:<width$}  {}",
            entry.name, entry.description
        ));
    }
    context
        .formatter
        .print_detail("\nRun `help <command>` for usage. Destructive commands accept --yes.");
    Ok(())
}

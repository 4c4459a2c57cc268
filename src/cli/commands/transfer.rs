use std::{fs, path::Path};

use giftbook_core::format::group_thousands;
use giftbook_storage_json::{export_document, import_document};
use tracing::info;

use crate::cli::args::ParsedArgs;
use crate::cli::context::AppContext;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::cli::CommandResult;
use crate::errors::CliError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write every record as a JSON document (stdout without FILE)",
            "export [FILE]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace all records with a JSON document",
            "import FILE [--yes]",
            cmd_import,
        ),
        CommandEntry::new(
            "backups",
            "List automatic backups of the record file",
            "backups",
            cmd_backups,
        ),
        CommandEntry::new(
            "restore",
            "Replace the records with a backup",
            "restore <backup-id> [--yes]",
            cmd_restore,
        ),
    ]
}

fn cmd_export(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&[])?;
    let records = context.open_storage()?.list()?;
    let document = export_document(&records)?;
    match args.positional(0) {
        None => println!("{document}"),
        Some(target) => {
            fs::write(target, format!("{document}\n"))?;
            info!(path = target, count = records.len(), "exported records");
            context.formatter.print_success(format!(
                "Exported {} records to {}",
                records.len(),
                target
            ));
        }
    }
    Ok(())
}

fn cmd_import(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&["yes"])?;
    let source = args
        .positional(0)
        .ok_or_else(|| CliError::Input("usage: import FILE [--yes]".into()))?;
    let raw = fs::read_to_string(Path::new(source))
        .map_err(|err| CliError::Command(format!("cannot read {source}: {err}")))?;
    let incoming = import_document(&raw)?;

    let storage = context.open_storage()?;
    let existing = storage.list()?.len();
    if !context.confirm(&format!(
        "Replace {existing} stored records with {} records from {source}?",
        incoming.len()
    ))? {
        return Ok(());
    }
    let count = incoming.len();
    storage.replace_all(incoming)?;
    context
        .formatter
        .print_success(format!("Imported {count} records from {source}"));
    Ok(())
}

fn cmd_backups(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&[])?;
    let backups = context.open_storage()?.list_backups()?;
    if backups.is_empty() {
        context.formatter.print_detail("No backups yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Backup"),
        TableColumn::left("Taken"),
        TableColumn::right("Bytes"),
    ]);
    for backup in &backups {
        table.add_row(vec![
            backup.id.clone(),
            backup
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".into()),
            group_thousands(backup.size_bytes as i64),
        ]);
    }
    table.print();
    Ok(())
}

fn cmd_restore(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&["yes"])?;
    let id = args
        .positional(0)
        .ok_or_else(|| CliError::Input("usage: restore <backup-id> [--yes]".into()))?;
    let storage = context.open_storage()?;
    if !context.confirm(&format!("Replace the current records with backup {id}?"))? {
        return Ok(());
    }
    let restored = storage.restore_backup(id)?;
    context.formatter.print_success(format!(
        "Restored {} records from {id}",
        restored.len()
    ));
    Ok(())
}

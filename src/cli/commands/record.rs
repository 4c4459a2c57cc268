use giftbook_core::{sample_data, RecordFilter, RecordService};
use giftbook_domain::{NewRecord, Record, RecordPatch};

use crate::cli::args::{
    parse_amount, parse_category, parse_date, parse_id, parse_kind, parse_relation, parse_year,
    ParsedArgs,
};
use crate::cli::context::AppContext;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::cli::CommandResult;
use crate::errors::{CliError, GiftbookError};

const RECORD_FIELDS: &[&str] = &[
    "date", "category", "person", "relation", "amount", "type", "event", "memo",
];
const FILTER_FIELDS: &[&str] = &["search", "category", "relation", "type", "year", "json"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a gift given or received",
            "add --date YYYY-MM-DD --category C --person P --relation R --amount N [--type Expense|Income] [--event E] [--memo M]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List records, optionally filtered",
            "list [--search S] [--category C] [--relation R] [--type T] [--year Y] [--json]",
            cmd_list,
        ),
        CommandEntry::new(
            "update",
            "Change fields of a record",
            "update <id> [--date D] [--category C] [--person P] [--relation R] [--amount N] [--type T] [--event E] [--memo M]",
            cmd_update,
        ),
        CommandEntry::new("delete", "Remove a record", "delete <id>", cmd_delete),
        CommandEntry::new(
            "sample",
            "Append the demonstration records",
            "sample [--yes]",
            cmd_sample,
        ),
        CommandEntry::new("clear", "Delete every record", "clear [--yes]", cmd_clear),
    ]
}

fn cmd_add(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(RECORD_FIELDS)?;
    let mut entry = NewRecord::new(
        parse_date(args.require("date")?)?,
        parse_category(args.require("category")?)?,
        args.require("person")?,
        parse_relation(args.require("relation")?)?,
        parse_amount(args.require("amount")?)?,
    );
    if let Some(kind) = args.option("type") {
        entry = entry.with_kind(parse_kind(kind)?);
    }
    if let Some(event) = args.option("event") {
        entry = entry.with_event_name(event);
    }
    if let Some(memo) = args.option("memo") {
        entry = entry.with_memo(memo);
    }
    let entry = RecordService::validate_new(entry)?;

    let storage = context.open_storage()?;
    let record = storage.insert(entry)?;
    context
        .formatter
        .print_success(format!("Added {} ({})", describe(context, &record), record.id));
    Ok(())
}

fn cmd_list(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(FILTER_FIELDS)?;
    let filter = RecordFilter {
        search: args.option("search").map(str::to_string),
        category: args.option("category").map(parse_category).transpose()?,
        relation: args.option("relation").map(parse_relation).transpose()?,
        kind: args.option("type").map(parse_kind).transpose()?,
        year: args.option("year").map(parse_year).transpose()?,
    };

    let records = context.open_storage()?.list()?;
    let matching = RecordService::filter(&records, &filter);

    if args.switch("json") {
        let json = serde_json::to_string_pretty(&matching).map_err(GiftbookError::from)?;
        println!("{json}");
        return Ok(());
    }

    if matching.is_empty() {
        context.formatter.print_detail(if records.is_empty() {
            "No records yet. Add one with `add` or load the demo with `sample`."
        } else {
            "No records match the filter."
        });
    } else {
        record_table(context, &matching).print();
    }
    context.formatter.print_detail(format!(
        "{} of {} records",
        matching.len(),
        records.len()
    ));
    Ok(())
}

fn cmd_update(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(RECORD_FIELDS)?;
    let id = parse_id(required_positional(args, "update <id>")?)?;
    let patch = RecordPatch {
        date: args.option("date").map(parse_date).transpose()?,
        category: args.option("category").map(parse_category).transpose()?,
        event_name: args.option("event").map(str::to_string),
        person: args.option("person").map(str::to_string),
        relation: args.option("relation").map(parse_relation).transpose()?,
        amount: args.option("amount").map(parse_amount).transpose()?,
        kind: args.option("type").map(parse_kind).transpose()?,
        memo: args.option("memo").map(str::to_string),
    };
    let patch = RecordService::validate_patch(patch)?;

    let storage = context.open_storage()?;
    let record = storage.update(id, &patch)?;
    context
        .formatter
        .print_success(format!("Updated {}", describe(context, &record)));
    Ok(())
}

fn cmd_delete(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&[])?;
    let id = parse_id(required_positional(args, "delete <id>")?)?;
    let storage = context.open_storage()?;
    let record = storage.delete(id)?;
    context
        .formatter
        .print_success(format!("Deleted {}", describe(context, &record)));
    Ok(())
}

fn cmd_sample(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&["yes"])?;
    let storage = context.open_storage()?;
    let existing = storage.list()?.len();
    if existing > 0
        && !context.confirm(&format!(
            "The book already holds {existing} records. Append the sample records anyway?"
        ))?
    {
        return Ok(());
    }
    let added = storage.insert_all(sample_data::sample_records())?.len();
    context
        .formatter
        .print_success(format!("Added {added} sample records."));
    Ok(())
}

fn cmd_clear(context: &mut AppContext, args: &ParsedArgs) -> CommandResult {
    args.ensure_known(&["yes"])?;
    let storage = context.open_storage()?;
    let existing = storage.list()?.len();
    if existing == 0 {
        context.formatter.print_detail("Nothing to clear.");
        return Ok(());
    }
    if !context.confirm(&format!("Delete all {existing} records?"))? {
        return Ok(());
    }
    storage.clear()?;
    context
        .formatter
        .print_success(format!("Removed {existing} records."));
    Ok(())
}

fn required_positional<'a>(args: &'a ParsedArgs, usage: &str) -> Result<&'a str, CliError> {
    args.positional(0)
        .ok_or_else(|| CliError::Input(format!("usage: {usage}")))
}

fn describe(context: &AppContext, record: &Record) -> String {
    let amount = context
        .formatter
        .signed_amount(&context.amounts(), record.amount, record.kind);
    format!(
        "{} {} {} {}",
        record.date,
        record.category.label(context.label_style()),
        record.person,
        amount
    )
}

/// One row per record, amounts marked `-` for expense and `+` for income.
pub fn record_table(context: &AppContext, records: &[&Record]) -> Table {
    let labels = context.label_style();
    let amounts = context.amounts();
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::left("Event"),
        TableColumn::left("Person"),
        TableColumn::left("Relation"),
        TableColumn::right("Amount"),
        TableColumn::left("Memo"),
    ]);
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            record.date.to_string(),
            record.category.label(labels).to_string(),
            record.event_name.clone(),
            record.person.clone(),
            record.relation.label(labels).to_string(),
            context
                .formatter
                .signed_amount(&amounts, record.amount, record.kind),
            record.memo.clone(),
        ]);
    }
    table
}

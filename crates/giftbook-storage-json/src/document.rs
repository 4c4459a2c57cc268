//! Export and validating import of the record collection as a JSON document.
//!
//! The document is a bare array of records using the camelCase field names of
//! [`Record`]. Import checks every entry before anything is returned, so a
//! caller can hand the result straight to `replace_all`.

use chrono::{DateTime, NaiveDate, Utc};
use giftbook_core::{CoreError, RecordService};
use giftbook_domain::{Classified, Record, RecordKind, Taxonomy};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pretty-printed array-of-records encoding of the collection.
pub fn export_document(records: &[Record]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(records).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Parses and validates an exported document.
///
/// Entries keep their document order. Category and relation labels that match
/// no known member are kept as unrecognized values.
pub fn import_document(raw: &str) -> Result<Vec<Record>, CoreError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| CoreError::Serde(err.to_string()))?;
    let Value::Array(entries) = value else {
        return Err(CoreError::Validation(
            "document must be a JSON array of records".into(),
        ));
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(fields) = entry else {
            return Err(CoreError::Validation(format!(
                "entry {index}: expected an object"
            )));
        };
        records.push(decode_entry(index, fields)?);
    }
    RecordService::ensure_unique_ids(&records)?;
    Ok(records)
}

fn decode_entry(index: usize, fields: &Map<String, Value>) -> Result<Record, CoreError> {
    let entry = Entry { index, fields };

    let id = entry.string("id")?;
    let id = Uuid::parse_str(id).map_err(|_| entry.invalid("id", "is not a UUID"))?;

    let date = entry.string("date")?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| entry.invalid("date", "must be a YYYY-MM-DD date"))?;

    let person = entry.string("person")?.trim();
    if person.is_empty() {
        return Err(entry.invalid("person", "must not be empty"));
    }

    let amount = entry
        .fields
        .get("amount")
        .ok_or_else(|| entry.invalid("amount", "is missing"))?
        .as_u64()
        .ok_or_else(|| entry.invalid("amount", "must be a non-negative integer"))?;

    let kind = entry
        .string("type")?
        .parse::<RecordKind>()
        .map_err(|_| entry.invalid("type", "must be Expense or Income"))?;

    let created_at = entry.string("createdAt")?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|_| entry.invalid("createdAt", "must be an RFC 3339 timestamp"))?
        .with_timezone(&Utc);

    Ok(Record {
        id,
        date,
        category: entry.classified("category")?,
        event_name: entry.optional_text("eventName")?,
        person: person.to_string(),
        relation: entry.classified("relation")?,
        amount,
        kind,
        memo: entry.optional_text("memo")?,
        created_at,
    })
}

struct Entry<'a> {
    index: usize,
    fields: &'a Map<String, Value>,
}

impl<'a> Entry<'a> {
    fn invalid(&self, field: &str, problem: &str) -> CoreError {
        CoreError::Validation(format!("entry {}: `{}` {}", self.index, field, problem))
    }

    fn string(&self, field: &str) -> Result<&'a str, CoreError> {
        match self.fields.get(field) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(self.invalid(field, "must be a string")),
            None => Err(self.invalid(field, "is missing")),
        }
    }

    fn optional_text(&self, field: &str) -> Result<String, CoreError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(_) => Err(self.invalid(field, "must be a string or null")),
        }
    }

    fn classified<T: Taxonomy>(&self, field: &str) -> Result<Classified<T>, CoreError> {
        let value = Classified::from_raw(self.string(field)?);
        if let Classified::Unrecognized(raw) = &value {
            warn!(entry = self.index, field, label = %raw, "unrecognized label kept");
        }
        Ok(value)
    }
}

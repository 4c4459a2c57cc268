//! Entry validation and list browsing helpers for gift records.

use std::collections::{BTreeSet, HashSet};

use giftbook_domain::{Category, NewRecord, Record, RecordKind, RecordPatch, Relation};

use crate::CoreError;

/// Criteria for the record list; absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against person, event name and memo.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub relation: Option<Relation>,
    pub kind: Option<RecordKind>,
    pub year: Option<i32>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.category.is_none()
            && self.relation.is_none()
            && self.kind.is_none()
            && self.year.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(term) = self.search_term() {
            let hit = [&record.person, &record.event_name, &record.memo]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category {
            if record.category.known() != Some(category) {
                return false;
            }
        }
        if let Some(relation) = self.relation {
            if record.relation.known() != Some(relation) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.year() != year {
                return false;
            }
        }
        true
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Provides validation and read-side helpers for the record collection.
pub struct RecordService;

impl RecordService {
    /// Checks a new entry and normalizes its free-text fields.
    pub fn validate_new(mut record: NewRecord) -> Result<NewRecord, CoreError> {
        record.person = required_person(&record.person)?;
        if record.amount == 0 {
            return Err(CoreError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        record.event_name = record.event_name.trim().to_string();
        record.memo = record.memo.trim().to_string();
        Ok(record)
    }

    /// Applies the same rules as [`RecordService::validate_new`] to the fields present.
    pub fn validate_patch(mut patch: RecordPatch) -> Result<RecordPatch, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation("nothing to update".into()));
        }
        if let Some(person) = patch.person.as_deref() {
            patch.person = Some(required_person(person)?);
        }
        if patch.amount == Some(0) {
            return Err(CoreError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        patch.event_name = patch.event_name.map(|value| value.trim().to_string());
        patch.memo = patch.memo.map(|value| value.trim().to_string());
        Ok(patch)
    }

    /// Records matching `filter`, in collection order.
    pub fn filter<'a>(records: &'a [Record], filter: &RecordFilter) -> Vec<&'a Record> {
        records.iter().filter(|record| filter.matches(record)).collect()
    }

    /// Distinct event years present, newest first.
    pub fn years(records: &[Record]) -> Vec<i32> {
        let years: BTreeSet<i32> = records.iter().map(Record::year).collect();
        years.into_iter().rev().collect()
    }

    /// Sorts ascending by event date; equal dates keep their relative order.
    pub fn sort_by_date(records: &mut [Record]) {
        records.sort_by_key(|record| record.date);
    }

    /// Rejects collections that reuse an id.
    pub fn ensure_unique_ids(records: &[Record]) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                return Err(CoreError::Validation(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }
        Ok(())
    }
}

fn required_person(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("person is required".into()));
    }
    Ok(trimmed.to_string())
}

//! Domain models for gift records and the shapes used to create or edit them.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::common::Classified;
use crate::taxonomy::{Category, RecordKind, Relation};

/// One monetary gift given or received at a life event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    /// Date of the event, not of data entry.
    pub date: NaiveDate,
    pub category: Classified<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_name: String,
    pub person: String,
    pub relation: Classified<Relation>,
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub memo: String,
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Materializes a new entry with a fresh id and creation timestamp.
    pub fn create(new: NewRecord) -> Self {
        Self::from_parts(Uuid::new_v4(), Utc::now(), new)
    }

    pub fn from_parts(id: Uuid, created_at: DateTime<Utc>, new: NewRecord) -> Self {
        Self {
            id,
            date: new.date,
            category: Classified::Known(new.category),
            event_name: new.event_name,
            person: new.person,
            relation: Classified::Known(new.relation),
            amount: new.amount,
            kind: new.kind,
            memo: new.memo,
            created_at,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> i64 {
        self.kind.sign() * self.amount as i64
    }
}

/// Fields supplied at the data-entry boundary.
///
/// Category and relation are the closed enumerations here, so an entry form
/// can never create an unrecognized label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub event_name: String,
    pub person: String,
    pub relation: Relation,
    pub amount: u64,
    pub kind: RecordKind,
    pub memo: String,
}

impl NewRecord {
    pub fn new(
        date: NaiveDate,
        category: Category,
        person: impl Into<String>,
        relation: Relation,
        amount: u64,
    ) -> Self {
        Self {
            date,
            category,
            event_name: String::new(),
            person: person.into(),
            relation,
            amount,
            kind: RecordKind::Expense,
            memo: String::new(),
        }
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = event_name.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub event_name: Option<String>,
    pub person: Option<String>,
    pub relation: Option<Relation>,
    pub amount: Option<u64>,
    pub kind: Option<RecordKind>,
    pub memo: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self == &RecordPatch::default()
    }

    /// Merges the present fields into `record`. `id` and `created_at` never change.
    pub fn apply(&self, record: &mut Record) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(category) = self.category {
            record.category = Classified::Known(category);
        }
        if let Some(event_name) = &self.event_name {
            record.event_name = event_name.clone();
        }
        if let Some(person) = &self.person {
            record.person = person.clone();
        }
        if let Some(relation) = self.relation {
            record.relation = Classified::Known(relation);
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(memo) = &self.memo {
            record.memo = memo.clone();
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

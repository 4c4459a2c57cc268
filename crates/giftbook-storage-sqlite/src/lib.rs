//! SQLite row store for the record collection.
//!
//! One row per record in `gift_records`. Text columns hold the same encodings
//! the JSON document uses, so a database and an exported document carry the
//! same values.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use giftbook_core::{storage::RecordStorage, CoreError, RecordService};
use giftbook_domain::{
    Category, Classified, NewRecord, Record, RecordKind, RecordPatch, Relation,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";
const COLUMNS: &str =
    "id, date, category, event_name, person, relation, amount, type, memo, created_at";

/// Stores records in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteRecordStorage {
    connection: Arc<Mutex<Connection>>,
    label: String,
}

impl SqliteRecordStorage {
    /// Opens (or creates) the database file at `path` and ensures the table exists.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let connection = Connection::open(path).map_err(sql_error)?;
        Self::from_connection(connection, format!("sqlite:{}", path.display()))
    }

    pub fn open_in_memory() -> Result<Self, CoreError> {
        let connection = Connection::open_in_memory().map_err(sql_error)?;
        Self::from_connection(connection, "sqlite::memory:".into())
    }

    fn from_connection(connection: Connection, label: String) -> Result<Self, CoreError> {
        create_table(&connection).map_err(sql_error)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            label,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.connection
            .lock()
            .map_err(|_| CoreError::Storage("database connection lock poisoned".into()))
    }

    fn fetch(connection: &Connection, id: Uuid) -> Result<Record, CoreError> {
        let raw = connection
            .prepare(&format!("SELECT {COLUMNS} FROM gift_records WHERE id = ?1"))
            .map_err(sql_error)?
            .query_row([id.to_string()], RawRow::map_row)
            .optional()
            .map_err(sql_error)?
            .ok_or(CoreError::RecordNotFound(id))?;
        raw.decode()
    }
}

impl RecordStorage for SqliteRecordStorage {
    fn list(&self) -> Result<Vec<Record>, CoreError> {
        let connection = self.lock()?;
        // rowid keeps insertion order among equal dates
        let mut statement = connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM gift_records ORDER BY date ASC, rowid ASC"
            ))
            .map_err(sql_error)?;
        let rows = statement
            .query_map([], RawRow::map_row)
            .map_err(sql_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_error)?;
        let records = rows
            .into_iter()
            .map(RawRow::decode)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "loaded records");
        Ok(records)
    }

    fn insert(&self, record: NewRecord) -> Result<Record, CoreError> {
        let record = Record::create(record);
        let connection = self.lock()?;
        insert_row(&connection, &record)?;
        debug!(id = %record.id, "inserted record");
        Ok(record)
    }

    fn insert_all(&self, entries: Vec<NewRecord>) -> Result<Vec<Record>, CoreError> {
        let created: Vec<Record> = entries.into_iter().map(Record::create).collect();
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction().map_err(sql_error)?;
        for record in &created {
            insert_row(&tx, record)?;
        }
        tx.commit().map_err(sql_error)?;
        info!(count = created.len(), "inserted records");
        Ok(created)
    }

    fn update(&self, id: Uuid, patch: &RecordPatch) -> Result<Record, CoreError> {
        let connection = self.lock()?;
        let mut record = Self::fetch(&connection, id)?;
        patch.apply(&mut record);
        connection
            .execute(
                "UPDATE gift_records
                 SET date = ?2, category = ?3, event_name = ?4, person = ?5,
                     relation = ?6, amount = ?7, type = ?8, memo = ?9
                 WHERE id = ?1",
                params![
                    record.id.to_string(),
                    record.date.format(DATE_FORMAT).to_string(),
                    record.category.as_str(),
                    empty_as_null(&record.event_name),
                    record.person,
                    record.relation.as_str(),
                    amount_column(record.amount)?,
                    record.kind.to_string(),
                    empty_as_null(&record.memo),
                ],
            )
            .map_err(sql_error)?;
        debug!(id = %id, "updated record");
        Ok(record)
    }

    fn delete(&self, id: Uuid) -> Result<Record, CoreError> {
        let connection = self.lock()?;
        let record = Self::fetch(&connection, id)?;
        connection
            .execute("DELETE FROM gift_records WHERE id = ?1", [id.to_string()])
            .map_err(sql_error)?;
        debug!(id = %id, "deleted record");
        Ok(record)
    }

    fn replace_all(&self, mut records: Vec<Record>) -> Result<(), CoreError> {
        RecordService::ensure_unique_ids(&records)?;
        RecordService::sort_by_date(&mut records);
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction().map_err(sql_error)?;
        tx.execute("DELETE FROM gift_records", []).map_err(sql_error)?;
        for record in &records {
            insert_row(&tx, record)?;
        }
        tx.commit().map_err(sql_error)?;
        info!(count = records.len(), "replaced record collection");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.lock()?
            .execute("DELETE FROM gift_records", [])
            .map_err(sql_error)?;
        info!("cleared record collection");
        Ok(())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS gift_records (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                event_name TEXT,
                person TEXT NOT NULL,
                relation TEXT NOT NULL,
                amount INTEGER NOT NULL,
                type TEXT NOT NULL,
                memo TEXT,
                created_at TEXT NOT NULL
                )",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS gift_records_date ON gift_records (date)",
        (),
    )?;
    Ok(())
}

fn insert_row(connection: &Connection, record: &Record) -> Result<(), CoreError> {
    connection
        .execute(
            &format!("INSERT INTO gift_records ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
            params![
                record.id.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
                record.category.as_str(),
                empty_as_null(&record.event_name),
                record.person,
                record.relation.as_str(),
                amount_column(record.amount)?,
                record.kind.to_string(),
                empty_as_null(&record.memo),
                record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ],
        )
        .map_err(sql_error)?;
    Ok(())
}

/// Column values as stored, before validation.
struct RawRow {
    id: String,
    date: String,
    category: String,
    event_name: Option<String>,
    person: String,
    relation: String,
    amount: i64,
    kind: String,
    memo: Option<String>,
    created_at: String,
}

impl RawRow {
    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            category: row.get(2)?,
            event_name: row.get(3)?,
            person: row.get(4)?,
            relation: row.get(5)?,
            amount: row.get(6)?,
            kind: row.get(7)?,
            memo: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn decode(self) -> Result<Record, CoreError> {
        let invalid =
            |column: &str| CoreError::Validation(format!("row {}: invalid `{}`", self.id, column));

        let id = Uuid::parse_str(&self.id).map_err(|_| invalid("id"))?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| invalid("date"))?;
        let person = self.person.trim();
        if person.is_empty() {
            return Err(invalid("person"));
        }
        let amount = u64::try_from(self.amount).map_err(|_| invalid("amount"))?;
        let kind = self.kind.parse::<RecordKind>().map_err(|_| invalid("type"))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|_| invalid("created_at"))?
            .with_timezone(&Utc);

        let category = Classified::<Category>::from_raw(&self.category);
        let relation = Classified::<Relation>::from_raw(&self.relation);
        if !category.is_known() || !relation.is_known() {
            warn!(
                id = %id,
                category = %self.category,
                relation = %self.relation,
                "unrecognized label kept"
            );
        }

        Ok(Record {
            id,
            date,
            category,
            event_name: self.event_name.unwrap_or_default(),
            person: person.to_string(),
            relation,
            amount,
            kind,
            memo: self.memo.unwrap_or_default(),
            created_at,
        })
    }
}

fn empty_as_null(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn amount_column(amount: u64) -> Result<i64, CoreError> {
    i64::try_from(amount)
        .map_err(|_| CoreError::Validation(format!("amount {} is too large", amount)))
}

fn sql_error(err: rusqlite::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

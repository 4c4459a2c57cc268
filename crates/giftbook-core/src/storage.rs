use giftbook_domain::{NewRecord, Record, RecordPatch};
use uuid::Uuid;

use crate::CoreError;

/// Abstraction over persistence backends holding the record collection.
///
/// Implementations keep the collection ordered ascending by event date and
/// either apply a write completely or leave the stored data untouched.
pub trait RecordStorage: Send + Sync {
    fn list(&self) -> Result<Vec<Record>, CoreError>;
    /// Assigns an id and creation timestamp, then stores the record.
    fn insert(&self, record: NewRecord) -> Result<Record, CoreError>;
    /// Stores several new records as one write. Returns them in input order.
    fn insert_all(&self, records: Vec<NewRecord>) -> Result<Vec<Record>, CoreError> {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .collect()
    }
    fn update(&self, id: Uuid, patch: &RecordPatch) -> Result<Record, CoreError>;
    fn delete(&self, id: Uuid) -> Result<Record, CoreError>;
    /// Replaces the whole collection, as an import does.
    fn replace_all(&self, records: Vec<Record>) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;

    /// Short name shown by the CLI and in logs.
    fn describe(&self) -> String;

    fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        Err(CoreError::Storage(format!(
            "{} does not keep backups",
            self.describe()
        )))
    }

    /// Makes the backup `id` the live collection and returns it.
    fn restore_backup(&self, id: &str) -> Result<Vec<Record>, CoreError> {
        Err(CoreError::Storage(format!(
            "{} cannot restore backup `{}`",
            self.describe(),
            id
        )))
    }
}

/// Describes a persisted snapshot of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub size_bytes: u64,
}

//! Filesystem-backed JSON persistence for the record collection.

pub mod document;

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use giftbook_core::{
    storage::{BackupInfo, RecordStorage},
    CoreError, RecordService,
};
use giftbook_domain::{NewRecord, Record, RecordPatch};
use tracing::{debug, info};
use uuid::Uuid;

pub use document::{export_document, import_document};

const RECORDS_FILE: &str = "records.json";
const BACKUPS_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "records";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Length of a formatted `BACKUP_TIMESTAMP_FORMAT` stamp.
const STAMP_LEN: usize = 15;
const BACKUPS_PER_SECOND: usize = 1000;
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Keeps the whole collection in `<root>/records.json`, with rotating copies
/// of previous versions under `<root>/backups`.
#[derive(Debug, Clone)]
pub struct JsonRecordStorage {
    root: PathBuf,
    retention: usize,
}

impl JsonRecordStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(root.join(BACKUPS_DIR))?;
        Ok(Self {
            root,
            retention: retention.max(1),
        })
    }

    pub fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_FILE)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_DIR)
    }

    fn load(&self) -> Result<Vec<Record>, CoreError> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        let records = import_document(&raw)?;
        debug!(path = %path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn store(&self, mut records: Vec<Record>) -> Result<(), CoreError> {
        RecordService::sort_by_date(&mut records);
        let path = self.records_path();
        self.backup_existing_file(&path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &export_document(&records)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), count = records.len(), "saved records");
        Ok(())
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backups_dir();
        fs::create_dir_all(&dir)?;
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        // names stay unique and sort newest-last within one second
        let target = (0..BACKUPS_PER_SECOND)
            .map(|seq| dir.join(format!("{BACKUP_PREFIX}_{stamp}_{seq:03}.{BACKUP_EXTENSION}")))
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| CoreError::Storage(format!("too many backups taken at {stamp}")))?;
        fs::copy(path, &target)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            debug!(backup = %entry.id, "pruning backup");
            let _ = fs::remove_file(self.backups_dir().join(entry.id));
        }
        Ok(())
    }

    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<Record>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut records = self.load()?;
        let outcome = change(&mut records)?;
        self.store(records)?;
        Ok(outcome)
    }
}

impl RecordStorage for JsonRecordStorage {
    fn list(&self) -> Result<Vec<Record>, CoreError> {
        self.load()
    }

    fn insert(&self, record: NewRecord) -> Result<Record, CoreError> {
        let record = Record::create(record);
        self.mutate(|records| {
            records.push(record.clone());
            Ok(record)
        })
    }

    fn insert_all(&self, entries: Vec<NewRecord>) -> Result<Vec<Record>, CoreError> {
        let created: Vec<Record> = entries.into_iter().map(Record::create).collect();
        self.mutate(|records| {
            records.extend(created.iter().cloned());
            Ok(created)
        })
    }

    fn update(&self, id: Uuid, patch: &RecordPatch) -> Result<Record, CoreError> {
        self.mutate(|records| {
            let record = records
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or(CoreError::RecordNotFound(id))?;
            patch.apply(record);
            Ok(record.clone())
        })
    }

    fn delete(&self, id: Uuid) -> Result<Record, CoreError> {
        self.mutate(|records| {
            let index = records
                .iter()
                .position(|record| record.id == id)
                .ok_or(CoreError::RecordNotFound(id))?;
            Ok(records.remove(index))
        })
    }

    fn replace_all(&self, records: Vec<Record>) -> Result<(), CoreError> {
        RecordService::ensure_unique_ids(&records)?;
        info!(count = records.len(), "replacing record collection");
        self.store(records)
    }

    fn clear(&self) -> Result<(), CoreError> {
        info!("clearing record collection");
        self.store(Vec::new())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.records_path().display())
    }

    fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backups_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    size_bytes: fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0),
                });
            }
        }
        entries.sort_by(|a, b| {
            Reverse(a.created_at)
                .cmp(&Reverse(b.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    fn restore_backup(&self, id: &str) -> Result<Vec<Record>, CoreError> {
        let path = self.backups_dir().join(id);
        if id.contains(['/', '\\']) || !path.is_file() {
            return Err(CoreError::Storage(format!("backup `{}` not found", id)));
        }
        let records = import_document(&fs::read_to_string(&path)?)?;
        info!(backup = id, count = records.len(), "restoring backup");
        self.store(records.clone())?;
        Ok(records)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let raw = stem.strip_prefix(&format!("{}_", BACKUP_PREFIX))?;
    let (stamp, seq) = if raw.is_char_boundary(STAMP_LEN) {
        raw.split_at(STAMP_LEN)
    } else {
        (raw, "")
    };
    if !seq.is_empty() && !seq.strip_prefix('_')?.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

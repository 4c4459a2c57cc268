use chrono::NaiveDate;
use giftbook_core::{storage::RecordStorage, CoreError};
use giftbook_domain::{Category, Classified, NewRecord, Record, RecordKind, RecordPatch, Relation};
use giftbook_storage_sqlite::SqliteRecordStorage;
use tempfile::tempdir;
use uuid::Uuid;

fn entry(date: (i32, u32, u32), person: &str, amount: u64) -> NewRecord {
    NewRecord::new(
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("date"),
        Category::Opening,
        person,
        Relation::BusinessContact,
        amount,
    )
}

#[test]
fn records_survive_reopening_the_database() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("data").join("giftbook.db");

    let stored = {
        let storage = SqliteRecordStorage::open(&path).expect("open");
        storage
            .insert(entry((2023, 10, 3), "Park", 300_000).with_memo("flowers"))
            .expect("insert")
    };

    let storage = SqliteRecordStorage::open(&path).expect("reopen");
    let records = storage.list().expect("list");
    assert_eq!(records, vec![stored]);
}

#[test]
fn list_orders_by_date_then_insertion() {
    let storage = SqliteRecordStorage::open_in_memory().expect("open");
    storage.insert(entry((2024, 1, 1), "B", 1)).expect("insert");
    storage.insert(entry((2012, 6, 6), "A", 1)).expect("insert");
    storage.insert(entry((2024, 1, 1), "C", 1)).expect("insert");

    let people: Vec<_> = storage
        .list()
        .expect("list")
        .into_iter()
        .map(|record| record.person)
        .collect();
    assert_eq!(people, ["A", "B", "C"]);
}

#[test]
fn update_merges_fields_and_unknown_ids_fail() {
    let storage = SqliteRecordStorage::open_in_memory().expect("open");
    let stored = storage.insert(entry((2020, 4, 4), "Jung", 10_000)).expect("insert");

    let patch = RecordPatch {
        kind: Some(RecordKind::Income),
        event_name: Some("Store launch".into()),
        ..RecordPatch::default()
    };
    let updated = storage.update(stored.id, &patch).expect("update");
    assert_eq!(updated.kind, RecordKind::Income);
    assert_eq!(storage.list().expect("list")[0].event_name, "Store launch");

    let missing = Uuid::new_v4();
    assert!(matches!(
        storage.update(missing, &patch),
        Err(CoreError::RecordNotFound(_))
    ));
    assert!(matches!(
        storage.delete(missing),
        Err(CoreError::RecordNotFound(_))
    ));
    assert_eq!(storage.delete(stored.id).expect("delete").id, stored.id);
}

#[test]
fn replace_all_is_all_or_nothing() {
    let storage = SqliteRecordStorage::open_in_memory().expect("open");
    storage.insert(entry((2020, 1, 1), "Before", 1)).expect("insert");

    let mut stray = Record::create(entry((2019, 1, 1), "Stray", 5));
    stray.relation = Classified::Unrecognized("Classmate".into());
    let incoming = vec![Record::create(entry((2021, 1, 1), "Imported", 2)), stray];
    storage.replace_all(incoming).expect("replace");

    let records = storage.list().expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].person, "Stray");
    assert_eq!(records[0].relation.as_str(), "Classmate");

    let mut duplicated = vec![
        Record::create(entry((2022, 1, 1), "X", 1)),
        Record::create(entry((2022, 1, 2), "Y", 1)),
    ];
    duplicated[1].id = duplicated[0].id;
    assert!(storage.replace_all(duplicated).is_err());
    assert_eq!(storage.list().expect("list").len(), 2);

    storage.clear().expect("clear");
    assert!(storage.list().expect("list").is_empty());
}

#[test]
fn insert_all_rolls_back_when_one_row_fails() {
    let storage = SqliteRecordStorage::open_in_memory().expect("open");
    let stored = storage
        .insert_all(vec![entry((2021, 5, 1), "Kim", 10), entry((2020, 5, 1), "Lee", 20)])
        .expect("insert all");
    assert_eq!(stored[0].person, "Kim");
    assert_eq!(storage.list().expect("list")[0].person, "Lee");

    let batch = vec![entry((2022, 1, 1), "Fits", 1), entry((2022, 1, 2), "Huge", u64::MAX)];
    assert!(matches!(
        storage.insert_all(batch),
        Err(CoreError::Validation(_))
    ));
    assert_eq!(storage.list().expect("list").len(), 2);
}

#[test]
fn sqlite_store_keeps_no_backups() {
    let storage = SqliteRecordStorage::open_in_memory().expect("open");
    assert!(matches!(
        storage.list_backups(),
        Err(CoreError::Storage(_))
    ));
}

mod common;

use common::{json_store, temp_home};
use giftbook_core::{
    sample_data::sample_records, storage::RecordStorage, RecordFilter, RecordService,
    StatsService,
};
use giftbook_domain::{Category, RecordKind};
use giftbook_storage_json::{export_document, import_document};

fn seeded_store() -> giftbook_storage_json::JsonRecordStorage {
    let store = json_store(&temp_home());
    for entry in sample_records() {
        store.insert(entry).expect("insert sample record");
    }
    store
}

#[test]
fn sample_book_dashboard_matches_hand_counts() {
    let records = seeded_store().list().unwrap();
    let dashboard = StatsService::dashboard(&records);

    assert_eq!(dashboard.totals.count, 15);
    assert_eq!(dashboard.totals.total, 5_630_000);
    assert_eq!(dashboard.income_expense.income_count, 1);
    assert_eq!(dashboard.income_expense.income_total, 100_000);
    assert_eq!(dashboard.income_expense.expense_total, 5_530_000);
    assert_eq!(dashboard.income_expense.net, -5_430_000);
    assert_eq!(dashboard.share_ratio.income_percent, 2);
    assert_eq!(dashboard.share_ratio.expense_percent, 98);

    let wedding = &dashboard.categories[0];
    assert_eq!(wedding.key, Category::Wedding);
    assert_eq!(wedding.count, 8);
    assert_eq!(wedding.share_percent, 53.3);

    let years: Vec<i32> = dashboard.years.iter().map(|bucket| bucket.year).collect();
    assert_eq!(
        years,
        [2012, 2013, 2014, 2015, 2016, 2018, 2019, 2020, 2023, 2024, 2025]
    );
    assert_eq!(dashboard.years[0].change_percent, None);
    // 2013 totals 600,000 after 50,000 in 2012.
    assert_eq!(dashboard.years[1].change_percent, Some(1100.0));
}

#[test]
fn stored_order_is_by_event_date_and_filters_apply() {
    let records = seeded_store().list().unwrap();
    assert!(records.windows(2).all(|pair| pair[0].date <= pair[1].date));

    let filter = RecordFilter {
        category: Some(Category::Condolence),
        ..RecordFilter::default()
    };
    assert_eq!(RecordService::filter(&records, &filter).len(), 2);

    let filter = RecordFilter {
        kind: Some(RecordKind::Income),
        year: Some(2025),
        ..RecordFilter::default()
    };
    let income = RecordService::filter(&records, &filter);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].person, "Neighbor Moon");

    assert_eq!(RecordService::years(&records)[0], 2025);
}

#[test]
fn exported_document_gives_the_same_statistics() {
    let records = seeded_store().list().unwrap();
    let restored = import_document(&export_document(&records).unwrap()).unwrap();
    assert_eq!(
        StatsService::dashboard(&records),
        StatsService::dashboard(&restored)
    );
}

use chrono::NaiveDate;
use giftbook_domain::{Category, Classified, NewRecord, Record, RecordKind, Relation, Taxonomy};

use crate::{record_service::RecordFilter, RecordService, StatsService, TotalsSummary};

fn record(
    date: (i32, u32, u32),
    category: Category,
    relation: Relation,
    amount: u64,
    kind: RecordKind,
) -> Record {
    let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date");
    Record::create(NewRecord::new(date, category, "Kim", relation, amount).with_kind(kind))
}

fn expense(date: (i32, u32, u32), category: Category, amount: u64) -> Record {
    record(date, category, Relation::Friend, amount, RecordKind::Expense)
}

fn mixed_history() -> Vec<Record> {
    vec![
        expense((2021, 6, 1), Category::Condolence, 100_000),
        expense((2019, 3, 2), Category::Wedding, 50_000),
        record((2020, 7, 9), Category::Opening, Relation::Relative, 30_000, RecordKind::Income),
        expense((2019, 11, 30), Category::Wedding, 70_000),
        record((2021, 1, 15), Category::Other, Relation::Workplace, 45_000, RecordKind::Income),
        expense((2020, 2, 2), Category::FirstBirthday, 20_000),
    ]
}

#[test]
fn empty_collection_yields_zero_buckets_and_totals() {
    let categories = StatsService::category_stats(&[]);
    assert_eq!(categories.len(), Category::ALL.len());
    assert!(categories
        .iter()
        .all(|bucket| bucket.count == 0 && bucket.share_percent == 0.0 && bucket.average == 0));
    assert_eq!(StatsService::relation_stats(&[]).len(), Relation::ALL.len());
    assert_eq!(
        StatsService::totals(&[]),
        TotalsSummary {
            count: 0,
            total: 0,
            average: 0
        }
    );
    assert!(StatsService::yearly_stats(&[]).is_empty());
    let split = StatsService::income_expense(&[]);
    assert_eq!(split.net, 0);
    assert_eq!(split.share_ratio().income_percent, 0);
    assert_eq!(split.share_ratio().expense_percent, 0);
}

#[test]
fn single_wedding_fills_one_bucket_and_one_year() {
    let records = vec![expense((2020, 1, 1), Category::Wedding, 50_000)];

    let categories = StatsService::category_stats(&records);
    let wedding = &categories[0];
    assert_eq!(wedding.key, Category::Wedding);
    assert_eq!(wedding.count, 1);
    assert_eq!(wedding.total, 50_000);
    assert_eq!(wedding.average, 50_000);
    assert_eq!(wedding.share_percent, 100.0);
    assert!(categories[1..].iter().all(|bucket| bucket.count == 0));

    let years = StatsService::yearly_stats(&records);
    assert_eq!(years.len(), 1);
    assert_eq!(years[0].year, 2020);
    assert_eq!(years[0].count, 1);
    assert_eq!(years[0].total, 50_000);
    assert_eq!(years[0].average, 50_000);
    assert_eq!(years[0].change_percent, None);
}

#[test]
fn year_over_year_change_is_rounded_to_one_decimal() {
    let records = vec![
        expense((2020, 5, 5), Category::Wedding, 150_000),
        expense((2019, 5, 5), Category::Wedding, 100_000),
    ];
    let years = StatsService::yearly_stats(&records);
    assert_eq!(years[0].year, 2019);
    assert_eq!(years[0].change_percent, None);
    assert_eq!(years[1].year, 2020);
    assert_eq!(years[1].change_percent, Some(50.0));
}

#[test]
fn negative_change_rounds_half_toward_positive() {
    // (35_000 - 40_000) / 40_000 = -12.5 %, so -125.0 per mille rounds to -125.
    let records = vec![
        expense((2018, 1, 1), Category::Wedding, 40_000),
        expense((2019, 1, 1), Category::Wedding, 35_000),
    ];
    let years = StatsService::yearly_stats(&records);
    assert_eq!(years[1].change_percent, Some(-12.5));
}

#[test]
fn change_is_none_after_zero_total_year() {
    let records = vec![
        expense((2018, 1, 1), Category::Wedding, 10_000),
        expense((2019, 1, 1), Category::Wedding, 0),
        expense((2020, 1, 1), Category::Wedding, 30_000),
    ];
    let years = StatsService::yearly_stats(&records);
    assert_eq!(years[1].change_percent, Some(-100.0));
    assert_eq!(years[2].change_percent, None);
}

#[test]
fn yearly_buckets_skip_absent_years_and_stay_ascending() {
    let records = vec![
        expense((2024, 1, 1), Category::Wedding, 20_000),
        expense((2012, 1, 1), Category::Wedding, 10_000),
        expense((2024, 12, 31), Category::Wedding, 20_000),
    ];
    let years = StatsService::yearly_stats(&records);
    let labels: Vec<_> = years.iter().map(|bucket| bucket.year).collect();
    assert_eq!(labels, [2012, 2024]);
    assert_eq!(years[1].count, 2);
    assert_eq!(years[1].change_percent, Some(300.0));
}

#[test]
fn net_and_share_ratio_follow_kind() {
    let records = vec![
        record((2022, 1, 1), Category::Wedding, Relation::Friend, 200_000, RecordKind::Income),
        record((2022, 2, 1), Category::Wedding, Relation::Friend, 120_000, RecordKind::Expense),
    ];
    let split = StatsService::income_expense(&records);
    assert_eq!(split.net, 80_000);
    assert_eq!(split.income_count, 1);
    assert_eq!(split.expense_average, 120_000);
    let ratio = split.share_ratio();
    assert_eq!(ratio.income_percent, 63);
    assert_eq!(ratio.expense_percent, 38);
}

#[test]
fn net_keeps_negative_sign() {
    let records = vec![
        record((2022, 1, 1), Category::Wedding, Relation::Friend, 10_000, RecordKind::Income),
        expense((2022, 2, 1), Category::Wedding, 50_000),
    ];
    let split = StatsService::income_expense(&records);
    assert_eq!(split.net, -40_000);
    assert_eq!(split.net, split.income_total as i64 - split.expense_total as i64);
    let signed: Vec<i64> = records.iter().map(Record::signed_amount).collect();
    assert_eq!(signed, [10_000, -50_000]);
}

#[test]
fn unrecognized_category_is_excluded_from_buckets_only() {
    let mut stray = record((2023, 4, 4), Category::Other, Relation::Friend, 70_000, RecordKind::Income);
    stray.category = Classified::Unrecognized("Graduation".into());
    let records = vec![expense((2023, 1, 1), Category::Wedding, 30_000), stray];

    let categories = StatsService::category_stats(&records);
    let bucketed: usize = categories.iter().map(|bucket| bucket.count).sum();
    assert_eq!(bucketed, 1);
    assert_eq!(categories[0].share_percent, 50.0);
    assert_eq!(categories.last().map(|bucket| bucket.count), Some(0));

    let totals = StatsService::totals(&records);
    assert_eq!(totals.count, 2);
    assert_eq!(totals.total, 100_000);

    let split = StatsService::income_expense(&records);
    assert_eq!(split.income_count, 1);
    assert_eq!(split.income_total, 70_000);
}

#[test]
fn bucket_sums_match_enumerated_records() {
    let mut records = mixed_history();
    records[0].relation = Classified::Unrecognized("Classmate".into());

    let categories = StatsService::category_stats(&records);
    assert_eq!(categories.iter().map(|b| b.count).sum::<usize>(), records.len());
    assert_eq!(
        categories.iter().map(|b| b.total).sum::<u64>(),
        records.iter().map(|r| r.amount).sum::<u64>()
    );
    let share: f64 = categories.iter().map(|b| b.share_percent).sum();
    assert!((share - 100.0).abs() <= 0.3, "share sum was {share}");

    let relations = StatsService::relation_stats(&records);
    let known = records.iter().filter(|r| r.relation.is_known()).count();
    assert_eq!(relations.iter().map(|b| b.count).sum::<usize>(), known);
}

#[test]
fn buckets_follow_declaration_order() {
    let records = mixed_history();
    let order: Vec<_> = StatsService::relation_stats(&records)
        .into_iter()
        .map(|bucket| bucket.key)
        .collect();
    assert_eq!(order, Relation::ALL);
}

#[test]
fn aggregation_is_idempotent() {
    let records = mixed_history();
    assert_eq!(StatsService::dashboard(&records), StatsService::dashboard(&records));
}

#[test]
fn dashboard_serializes_change_as_null_for_first_year() {
    let dashboard = StatsService::dashboard(&mixed_history());
    let json = serde_json::to_value(&dashboard).expect("serialize dashboard");
    assert!(json["years"][0]["changePercent"].is_null());
    assert_eq!(json["categories"][0]["key"], "Wedding");
    assert_eq!(json["totals"]["count"], 6);
}

#[test]
fn filter_combines_search_category_and_year() {
    let mut records = mixed_history();
    records[1].memo = "Hotel Lotte ballroom".into();
    records[3].event_name = "Reception".into();

    let filter = RecordFilter {
        search: Some("hotel".into()),
        ..RecordFilter::default()
    };
    let hits = RecordService::filter(&records, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, records[1].id);

    let filter = RecordFilter {
        category: Some(Category::Wedding),
        year: Some(2019),
        ..RecordFilter::default()
    };
    assert_eq!(RecordService::filter(&records, &filter).len(), 2);

    let filter = RecordFilter {
        kind: Some(RecordKind::Income),
        search: Some("   ".into()),
        ..RecordFilter::default()
    };
    assert_eq!(RecordService::filter(&records, &filter).len(), 2);
    assert!(RecordFilter::default().is_empty());
}

#[test]
fn years_are_distinct_and_descending() {
    assert_eq!(RecordService::years(&mixed_history()), [2021, 2020, 2019]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let first = expense((2020, 1, 1), Category::Wedding, 1);
    let mut second = expense((2020, 1, 2), Category::Wedding, 1);
    second.id = first.id;
    assert!(RecordService::ensure_unique_ids(&[first, second]).is_err());
}

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use giftbook_core::{RecordFilter, RecordService, StatsService};
use giftbook_domain::{Category, NewRecord, Record, RecordKind, Relation, Taxonomy};
use giftbook_storage_json::{export_document, import_document};

fn build_records(count: usize) -> Vec<Record> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let entry = NewRecord::new(
                start + Duration::days((idx * 3) as i64),
                Category::ALL[idx % Category::ALL.len()],
                format!("Person {idx}"),
                Relation::ALL[idx % Relation::ALL.len()],
                10_000 + (idx % 50) as u64 * 10_000,
            );
            let entry = if idx % 4 == 0 {
                entry.with_kind(RecordKind::Income)
            } else {
                entry
            };
            Record::create(entry)
        })
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let records = build_records(5_000);

    c.bench_function("dashboard_5k", |b| {
        b.iter(|| black_box(StatsService::dashboard(black_box(&records))))
    });

    let filter = RecordFilter {
        search: Some("person 4".into()),
        year: Some(2010),
        ..RecordFilter::default()
    };
    c.bench_function("filter_5k", |b| {
        b.iter(|| black_box(RecordService::filter(black_box(&records), &filter).len()))
    });
}

fn bench_document(c: &mut Criterion) {
    let records = build_records(5_000);
    let document = export_document(&records).expect("export");

    c.bench_function("export_document_5k", |b| {
        b.iter(|| black_box(export_document(black_box(&records)).expect("export")))
    });
    c.bench_function("import_document_5k", |b| {
        b.iter(|| black_box(import_document(black_box(&document)).expect("import")))
    });
}

criterion_group!(benches, bench_dashboard, bench_document);
criterion_main!(benches);

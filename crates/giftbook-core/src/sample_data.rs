//! Demonstration entries for an empty record book.

use chrono::NaiveDate;
use giftbook_domain::{Category, NewRecord, RecordKind, Relation};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn entry(
    date: NaiveDate,
    category: Category,
    event_name: &str,
    person: &str,
    relation: Relation,
    amount: u64,
    memo: &str,
) -> NewRecord {
    NewRecord::new(date, category, person, relation, amount)
        .with_event_name(event_name)
        .with_memo(memo)
}

/// A fixed history spanning 2012 to 2025, mostly expenses.
#[rustfmt::skip]
pub fn sample_records() -> Vec<NewRecord> {
    use Category::*;

    vec![
        entry(day(2012, 11, 3), Wedding, "Wedding", "Deacon Han", Relation::Congregation, 50_000, "son's wedding"),
        entry(day(2013, 4, 27), Wedding, "Wedding", "Rev. Yoon", Relation::Presbytery, 50_000, "bank transfer"),
        entry(day(2013, 10, 3), Wedding, "Wedding", "Cousin Jae-won", Relation::Relative, 500_000, "Seoul, 3rd floor hall"),
        entry(day(2013, 11, 10), Condolence, "Funeral", "Elder Noh", Relation::Congregation, 50_000, "Sacheon funeral hall"),
        entry(day(2014, 9, 5), Wedding, "Wedding", "Elder Ko", Relation::Congregation, 100_000, ""),
        entry(day(2015, 8, 8), Wedding, "Wedding", "Mr. Bae's daughter", Relation::BusinessContact, 100_000, ""),
        entry(day(2016, 6, 18), SeventiethBirthday, "70th birthday", "Deaconess Jung", Relation::Congregation, 50_000, "lunch banquet"),
        entry(day(2018, 3, 3), FirstBirthday, "First birthday", "Min-ji's baby", Relation::Workplace, 30_000, ""),
        entry(day(2019, 5, 11), Wedding, "Wedding", "Kwon family", Relation::Friend, 100_000, "son's wedding"),
        entry(day(2020, 2, 22), Wedding, "Wedding", "Uncle Seok", Relation::Relative, 100_000, ""),
        entry(day(2023, 8, 29), Condolence, "Funeral", "Deacon Oh", Relation::Congregation, 100_000, "mother passed away"),
        entry(day(2024, 11, 15), Opening, "Ninetieth thanksgiving", "Grandmother Choi", Relation::Relative, 4_000_000, "hotel buffet, towels, cake"),
        entry(day(2025, 4, 21), Opening, "Ordination", "Pastor Im", Relation::Congregation, 100_000, "ordination in Chuncheon"),
        entry(day(2025, 10, 4), SeventiethBirthday, "70th birthday", "Pastor Seo", Relation::Presbytery, 200_000, ""),
        entry(day(2025, 12, 20), Wedding, "Wedding", "Neighbor Moon", Relation::Neighbor, 100_000, "")
            .with_kind(RecordKind::Income),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordService;

    #[test]
    fn sample_records_pass_entry_validation() {
        let records = sample_records();
        assert_eq!(records.len(), 15);
        for record in records {
            RecordService::validate_new(record).expect("sample entry is valid");
        }
    }
}

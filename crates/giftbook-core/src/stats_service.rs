//! Aggregation views over a record collection.
//!
//! Every function here is total over its input: an empty slice, an empty
//! bucket, or a zero-total comparison year resolves to `0`, `0.0` or `None`.
//! Nothing is cached; callers recompute from the full collection.

use std::collections::BTreeMap;

use giftbook_domain::{Category, Classified, Record, RecordKind, Relation, Taxonomy};
use serde::Serialize;

/// Summary row for one member of a closed taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket<T> {
    pub key: T,
    pub count: usize,
    pub total: u64,
    pub average: u64,
    /// Share of the whole input's record count, one decimal place.
    pub share_percent: f64,
}

pub type CategoryBucket = Bucket<Category>;
pub type RelationBucket = Bucket<Relation>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    pub year: i32,
    pub count: usize,
    pub total: u64,
    pub average: u64,
    /// `None` for the earliest year and after a year totalling zero.
    pub change_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    pub count: usize,
    pub total: u64,
    pub average: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseSummary {
    pub income_count: usize,
    pub income_total: u64,
    pub income_average: u64,
    pub expense_count: usize,
    pub expense_total: u64,
    pub expense_average: u64,
    pub net: i64,
}

/// Whole-percent split of the combined income and expense total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRatio {
    pub income_percent: u32,
    pub expense_percent: u32,
}

impl IncomeExpenseSummary {
    pub fn share_ratio(&self) -> ShareRatio {
        let sum = self.income_total + self.expense_total;
        ShareRatio {
            income_percent: whole_percent(self.income_total, sum),
            expense_percent: whole_percent(self.expense_total, sum),
        }
    }
}

/// Every statistics view for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub totals: TotalsSummary,
    pub income_expense: IncomeExpenseSummary,
    pub share_ratio: ShareRatio,
    pub categories: Vec<CategoryBucket>,
    pub relations: Vec<RelationBucket>,
    pub years: Vec<YearBucket>,
}

pub struct StatsService;

impl StatsService {
    /// One bucket per category, in declaration order, zero rows included.
    pub fn category_stats(records: &[Record]) -> Vec<CategoryBucket> {
        bucket_by_taxonomy(records, |record| &record.category)
    }

    /// One bucket per relation, in declaration order, zero rows included.
    pub fn relation_stats(records: &[Record]) -> Vec<RelationBucket> {
        bucket_by_taxonomy(records, |record| &record.relation)
    }

    /// One bucket per distinct event year, ascending.
    pub fn yearly_stats(records: &[Record]) -> Vec<YearBucket> {
        let mut by_year: BTreeMap<i32, (usize, u64)> = BTreeMap::new();
        for record in records {
            let entry = by_year.entry(record.year()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += record.amount;
        }

        let mut buckets = Vec::with_capacity(by_year.len());
        let mut previous_total: Option<u64> = None;
        for (year, (count, total)) in by_year {
            let change_percent = match previous_total {
                Some(prev) if prev > 0 => {
                    let delta = total as f64 - prev as f64;
                    Some(round_half_up(delta / prev as f64 * 1000.0) / 10.0)
                }
                _ => None,
            };
            buckets.push(YearBucket {
                year,
                count,
                total,
                average: rounded_average(total, count),
                change_percent,
            });
            previous_total = Some(total);
        }
        buckets
    }

    /// Count, total and average over every record regardless of kind.
    pub fn totals(records: &[Record]) -> TotalsSummary {
        let count = records.len();
        let total = records.iter().map(|record| record.amount).sum();
        TotalsSummary {
            count,
            total,
            average: rounded_average(total, count),
        }
    }

    /// Income/expense split keyed on `kind`; taxonomy labels play no part.
    pub fn income_expense(records: &[Record]) -> IncomeExpenseSummary {
        let mut income = (0usize, 0u64);
        let mut expense = (0usize, 0u64);
        for record in records {
            let side = match record.kind {
                RecordKind::Income => &mut income,
                RecordKind::Expense => &mut expense,
            };
            side.0 += 1;
            side.1 += record.amount;
        }
        IncomeExpenseSummary {
            income_count: income.0,
            income_total: income.1,
            income_average: rounded_average(income.1, income.0),
            expense_count: expense.0,
            expense_total: expense.1,
            expense_average: rounded_average(expense.1, expense.0),
            net: records.iter().map(Record::signed_amount).sum(),
        }
    }

    pub fn dashboard(records: &[Record]) -> Dashboard {
        let income_expense = Self::income_expense(records);
        Dashboard {
            totals: Self::totals(records),
            share_ratio: income_expense.share_ratio(),
            income_expense,
            categories: Self::category_stats(records),
            relations: Self::relation_stats(records),
            years: Self::yearly_stats(records),
        }
    }
}

/// Groups records over the closed taxonomy `T`.
///
/// Unrecognized labels fall into no bucket but still count toward the
/// denominator of `share_percent`.
fn bucket_by_taxonomy<T, F>(records: &[Record], select: F) -> Vec<Bucket<T>>
where
    T: Taxonomy,
    F: Fn(&Record) -> &Classified<T>,
{
    let mut sums = vec![(0usize, 0u64); T::ALL.len()];
    for record in records {
        if let Classified::Known(member) = select(record) {
            let slot = &mut sums[member.ordinal()];
            slot.0 += 1;
            slot.1 += record.amount;
        }
    }

    let overall = records.len();
    T::ALL
        .iter()
        .zip(sums)
        .map(|(member, (count, total))| Bucket {
            key: *member,
            count,
            total,
            average: rounded_average(total, count),
            share_percent: tenth_percent(count, overall),
        })
        .collect()
}

/// `round(total / count)`, or `0` for an empty group.
pub fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    (total + count / 2) / count
}

/// `round(part / whole * 1000) / 10`, or `0.0` when `whole` is zero.
pub fn tenth_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_half_up(part as f64 / whole as f64 * 1000.0) / 10.0
}

/// `round(part / whole * 100)`, or `0` when `whole` is zero.
pub fn whole_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0) as u32
}

/// Rounds to the nearest integer with ties toward positive infinity, so
/// `-12.5` becomes `-12` and `62.5` becomes `63`.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_up_breaks_ties_upward() {
        assert_eq!(round_half_up(62.5), 63.0);
        assert_eq!(round_half_up(-12.5), -12.0);
        assert_eq!(round_half_up(-12.6), -13.0);
        assert_eq!(round_half_up(0.4), 0.0);
    }

    #[test]
    fn rounded_average_matches_float_rounding() {
        assert_eq!(rounded_average(0, 0), 0);
        assert_eq!(rounded_average(3, 2), 2);
        assert_eq!(rounded_average(5, 3), 2);
        assert_eq!(rounded_average(4, 3), 1);
        assert_eq!(rounded_average(250_000, 2), 125_000);
    }

    #[test]
    fn percent_helpers_guard_zero_denominators() {
        assert_eq!(tenth_percent(3, 0), 0.0);
        assert_eq!(tenth_percent(1, 3), 33.3);
        assert_eq!(tenth_percent(2, 3), 66.7);
        assert_eq!(whole_percent(5, 0), 0);
        assert_eq!(whole_percent(120_000, 320_000), 38);
    }
}

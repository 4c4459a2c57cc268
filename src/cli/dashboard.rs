//! Text rendering of the statistics dashboard.

use giftbook_core::{
    round_half_up, Bucket, CurrencyFormatter, Dashboard, ShareRatio, YearBucket,
};
use giftbook_domain::{LabelStyle, RecordKind, Taxonomy};

use crate::cli::{
    output::Formatter,
    table::{Table, TableColumn},
};

const BAR_WIDTH: usize = 30;
const SHARE_WIDTH: usize = 40;

/// Renders every view of a [`Dashboard`] as printable lines.
pub struct DashboardView<'a> {
    pub dashboard: &'a Dashboard,
    pub labels: LabelStyle,
    pub amounts: &'a dyn CurrencyFormatter,
    pub formatter: Formatter,
}

impl DashboardView<'_> {
    pub fn print(&self) {
        self.formatter.print_header("Overview");
        self.formatter.print_two_column(&self.cards());

        self.formatter.print_header("Income / expense share");
        println!("{}", self.share_line());

        self.formatter.print_header("By category");
        self.print_buckets(&self.dashboard.categories, "Category");

        self.formatter.print_header("By relation");
        self.print_buckets(&self.dashboard.relations, "Relation");

        self.formatter.print_header("By year");
        if self.dashboard.years.is_empty() {
            self.formatter.print_detail("No records yet.");
        } else {
            self.year_table().print();
        }
    }

    /// Total, income, expense and net summary rows.
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        let totals = &self.dashboard.totals;
        let split = &self.dashboard.income_expense;
        vec![
            ("Records", totals.count.to_string()),
            ("Total", self.amount(totals.total)),
            ("Average", self.amount(totals.average)),
            (
                "Income",
                self.formatter.kind_color(
                    format!(
                        "{} in {} (avg {})",
                        self.amount(split.income_total),
                        split.income_count,
                        self.amount(split.income_average)
                    ),
                    RecordKind::Income,
                ),
            ),
            (
                "Expense",
                self.formatter.kind_color(
                    format!(
                        "{} in {} (avg {})",
                        self.amount(split.expense_total),
                        split.expense_count,
                        self.amount(split.expense_average)
                    ),
                    RecordKind::Expense,
                ),
            ),
            ("Net", self.formatter.net_amount(self.amounts, split.net)),
        ]
    }

    pub fn share_line(&self) -> String {
        let ShareRatio {
            income_percent,
            expense_percent,
        } = self.dashboard.share_ratio;
        let sum = income_percent + expense_percent;
        if sum == 0 {
            return "no amounts recorded".into();
        }
        let income_cells =
            round_half_up(income_percent as f64 / sum as f64 * SHARE_WIDTH as f64) as usize;
        let bar = format!(
            "{}{}",
            self.formatter
                .kind_color("█".repeat(income_cells), RecordKind::Income),
            self.formatter.kind_color(
                "░".repeat(SHARE_WIDTH.saturating_sub(income_cells)),
                RecordKind::Expense
            ),
        );
        format!("Income {income_percent}%  {bar}  Expense {expense_percent}%")
    }

    fn print_buckets<T: Taxonomy>(&self, buckets: &[Bucket<T>], heading: &str) {
        let table = self.bucket_table(buckets, heading);
        if table.rows.is_empty() {
            self.formatter.print_detail("No records yet.");
        } else {
            table.print();
        }
    }

    /// Rows with at least one record, in declaration order.
    pub fn bucket_table<T: Taxonomy>(&self, buckets: &[Bucket<T>], heading: &str) -> Table {
        let mut table = Table::new(vec![
            TableColumn::left(heading),
            TableColumn::right("Count"),
            TableColumn::right("Total"),
            TableColumn::right("Average"),
            TableColumn::right("Share"),
        ]);
        for bucket in buckets.iter().filter(|bucket| bucket.count > 0) {
            table.add_row(vec![
                bucket.key.label(self.labels).to_string(),
                bucket.count.to_string(),
                self.amount(bucket.total),
                self.amount(bucket.average),
                format!("{:.1}%", bucket.share_percent),
            ]);
        }
        table
    }

    pub fn year_table(&self) -> Table {
        let max_total = self
            .dashboard
            .years
            .iter()
            .map(|bucket| bucket.total)
            .max()
            .unwrap_or(0);
        let mut table = Table::new(vec![
            TableColumn::left("Year"),
            TableColumn::right("Count"),
            TableColumn::right("Total"),
            TableColumn::right("Average"),
            TableColumn::right("Change"),
            TableColumn::left(""),
        ]);
        for bucket in &self.dashboard.years {
            table.add_row(vec![
                bucket.year.to_string(),
                bucket.count.to_string(),
                self.amount(bucket.total),
                self.amount(bucket.average),
                change_label(bucket),
                bar(bucket.total, max_total, BAR_WIDTH),
            ]);
        }
        table
    }

    fn amount(&self, value: u64) -> String {
        self.amounts.format_amount(value as i64)
    }
}

fn change_label(bucket: &YearBucket) -> String {
    match bucket.change_percent {
        Some(change) => format!("{change:+.1}%"),
        None => "-".into(),
    }
}

/// `width` cells scaled to `max`; any non-zero total gets at least one.
fn bar(total: u64, max: u64, width: usize) -> String {
    if max == 0 || total == 0 {
        return String::new();
    }
    let cells = round_half_up(total as f64 / max as f64 * width as f64) as usize;
    "█".repeat(cells.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use giftbook_core::{GroupedFormatter, StatsService};
    use giftbook_domain::{Category, NewRecord, Record, Relation};

    fn records() -> Vec<Record> {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        vec![
            Record::create(NewRecord::new(
                day(2019, 1, 1),
                Category::Wedding,
                "Kim",
                Relation::Friend,
                100_000,
            )),
            Record::create(
                NewRecord::new(
                    day(2020, 1, 1),
                    Category::Condolence,
                    "Lee",
                    Relation::Relative,
                    150_000,
                )
                .with_kind(RecordKind::Income),
            ),
        ]
    }

    #[test]
    fn bucket_tables_skip_empty_rows_and_use_locale_labels() {
        colored::control::set_override(false);
        let dashboard = StatsService::dashboard(&records());
        let amounts = GroupedFormatter::new("KRW");
        let view = DashboardView {
            dashboard: &dashboard,
            labels: LabelStyle::Korean,
            amounts: &amounts,
            formatter: Formatter::new(false),
        };
        let table = view.bucket_table(&dashboard.categories, "Category");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "결혼");
        assert_eq!(table.rows[1][4], "50.0%");
    }

    #[test]
    fn year_table_shows_change_and_scaled_bars() {
        colored::control::set_override(false);
        let dashboard = StatsService::dashboard(&records());
        let amounts = GroupedFormatter::new("");
        let view = DashboardView {
            dashboard: &dashboard,
            labels: LabelStyle::English,
            amounts: &amounts,
            formatter: Formatter::new(false),
        };
        let table = view.year_table();
        assert_eq!(table.rows[0][4], "-");
        assert_eq!(table.rows[1][4], "+50.0%");
        assert_eq!(table.rows[1][5].chars().count(), BAR_WIDTH);
        assert_eq!(table.rows[0][5].chars().count(), 20);
        assert_eq!(table.rows[1][2], "150,000");
    }

    #[test]
    fn bars_are_empty_without_totals() {
        assert_eq!(bar(0, 0, 10), "");
        assert_eq!(bar(1, 1_000, 10), "█");
    }
}

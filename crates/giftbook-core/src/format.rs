/// Formats monetary amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: i64) -> String;
}

/// Groups digits by thousands and appends a unit, e.g. `1,250,000 KRW`.
#[derive(Debug, Clone)]
pub struct GroupedFormatter {
    unit: String,
}

impl GroupedFormatter {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }
}

impl CurrencyFormatter for GroupedFormatter {
    fn format_amount(&self, amount: i64) -> String {
        let grouped = group_thousands(amount);
        if self.unit.is_empty() {
            grouped
        } else {
            format!("{} {}", grouped, self.unit)
        }
    }
}

/// Inserts `,` between groups of three digits, keeping a leading `-`.
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

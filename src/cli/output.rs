//! Styled terminal output for the CLI.

use std::{fmt, io::IsTerminal};

use colored::Colorize;
use giftbook_core::CurrencyFormatter;
use giftbook_domain::RecordKind;

/// Decides whether ANSI colors are emitted for the rest of the process.
///
/// Colors need the config switch, a terminal on stdout and no `NO_COLOR`.
pub fn configure_color(enabled: bool) -> bool {
    let use_color =
        enabled && std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    colored::control::set_override(use_color);
    use_color
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Success,
    Warning,
    Muted,
}

/// Prints headers, status lines and amounts, plain when colors are off.
#[derive(Clone, Copy, Debug)]
pub struct Formatter {
    plain: bool,
}

impl Formatter {
    pub fn new(use_color: bool) -> Self {
        Self { plain: !use_color }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.apply_style(Style::Header, title));
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{message}");
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Muted, message));
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Success, message));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, message));
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("  {:<width$}  {}", label, value, width = label_width + 2);
        }
    }

    /// Unsigned amount with the `-` / `+` marker of its kind.
    pub fn signed_amount(
        &self,
        amounts: &dyn CurrencyFormatter,
        amount: u64,
        kind: RecordKind,
    ) -> String {
        let marker = match kind {
            RecordKind::Expense => '-',
            RecordKind::Income => '+',
        };
        let text = format!("{marker}{}", amounts.format_amount(amount as i64));
        self.kind_color(text, kind)
    }

    pub fn kind_color(&self, text: String, kind: RecordKind) -> String {
        match kind {
            RecordKind::Expense => text.red().to_string(),
            RecordKind::Income => text.green().to_string(),
        }
    }

    /// Green when non-negative, red otherwise.
    pub fn net_amount(&self, amounts: &dyn CurrencyFormatter, net: i64) -> String {
        let text = amounts.format_amount(net);
        if net >= 0 {
            text.green().bold().to_string()
        } else {
            text.red().bold().to_string()
        }
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = match style {
            Style::Header => format!("=== {} ===", message),
            Style::Success if self.plain => format!("OK: {}", message),
            Style::Success => format!("✔ {}", message),
            Style::Warning if self.plain => format!("WARNING: {}", message),
            Style::Warning => format!("⚠ {}", message),
            Style::Muted => message.to_string(),
        };
        match style {
            Style::Header => text.bold().to_string(),
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Muted => text.dimmed().to_string(),
        }
    }
}

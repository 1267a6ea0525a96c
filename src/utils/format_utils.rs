/// How currency amounts are rendered in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyStyle {
    /// id-ID grouping: `Rp 1.250.000`
    #[default]
    Locale,
    /// Plain fallback: `Rp 1250000`
    Plain,
}

const CURRENCY_PREFIX: &str = "Rp";

/// Integer-only rupiah display. Non-finite input renders as zero.
pub fn format_currency(value: f64, style: CurrencyStyle) -> String {
    let n = if value.is_finite() { value.round() } else { 0.0 };
    match style {
        CurrencyStyle::Locale => {
            let sign = if n < 0.0 { "-" } else { "" };
            format!("{}{} {}", sign, CURRENCY_PREFIX, group_thousands(n.abs() as u64, '.'))
        }
        CurrencyStyle::Plain => format!("{} {}", CURRENCY_PREFIX, n as i64),
    }
}

/// Formats an integer with a thousands separator, e.g. `1250000` -> `1.250.000`.
pub fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

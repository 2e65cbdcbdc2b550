use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellType, CellValue, Numeric};

/// Currency applied to currency cells when none is recorded
pub const DEFAULT_CURRENCY: &str = "USD";
/// Decimals used for currency and percentage display when none are recorded
pub const DEFAULT_DECIMALS: usize = 2;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Presentation metadata attached to a cell; never used for computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    /// ISO 4217 currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl CellFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format attached to currency cells produced by import
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            currency: Some(code.into()),
            decimals: Some(DEFAULT_DECIMALS),
            date_format: None,
        }
    }

    /// Builder pattern: set decimals
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Get the effective currency code (default is USD)
    pub fn effective_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

/// Render a number the way a plain `toString` would: integers without a
/// fractional part, everything else in shortest round-trip form. Magnitudes
/// of 1e21 and up, or below 1e-6, use exponent notation (`1e-7`, `1.5e+21`).
pub fn plain_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }

    if n.fract() == 0.0 && magnitude < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn fixed(n: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, n)
}

/// Display symbol for an ISO currency code
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" | "CNY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        "KRW" => "₩".to_string(),
        other => format!("{} ", other),
    }
}

/// Currency rendering: symbol prefix, fixed decimals
pub fn format_currency(value: f64, currency: Option<&str>, decimals: Option<usize>) -> String {
    let symbol = currency_symbol(currency.unwrap_or(DEFAULT_CURRENCY));
    let digits = fixed(value.abs(), decimals.unwrap_or(DEFAULT_DECIMALS));
    if value < 0.0 {
        format!("-{}{}", symbol, digits)
    } else {
        format!("{}{}", symbol, digits)
    }
}

/// Number rendering with optional fixed decimals
pub fn format_number(value: f64, decimals: Option<usize>) -> String {
    match decimals {
        Some(d) => fixed(value, d),
        None => plain_number(value),
    }
}

/// Percentage rendering of a stored fraction (0.45 -> "45.00%")
pub fn format_percentage(fraction: f64, decimals: Option<usize>) -> String {
    format!(
        "{}%",
        fixed(fraction * 100.0, decimals.unwrap_or(DEFAULT_DECIMALS))
    )
}

/// Display text for a committed cell value.
///
/// Strings are shown verbatim, including unparsed input in numeric cells.
pub fn display_value(cell: &Cell) -> String {
    let format = cell.format.as_ref();
    let decimals = format.and_then(|f| f.decimals);

    match &cell.value {
        CellValue::Text(s) | CellValue::Date(s) => s.clone(),
        CellValue::Number(Numeric::Unparsed(s))
        | CellValue::Currency(Numeric::Unparsed(s))
        | CellValue::Percentage(Numeric::Unparsed(s)) => s.clone(),
        CellValue::Currency(Numeric::Parsed(n)) => {
            format_currency(*n, format.and_then(|f| f.currency.as_deref()), decimals)
        }
        CellValue::Number(Numeric::Parsed(n)) => format_number(*n, decimals),
        CellValue::Percentage(Numeric::Parsed(n)) => format_percentage(*n, decimals),
    }
}

/// Text written for a cell in delimited-text export
pub fn export_text(cell: &Cell) -> String {
    match &cell.value {
        CellValue::Currency(Numeric::Parsed(n)) => format!("${}", fixed(*n, 2)),
        CellValue::Percentage(Numeric::Parsed(n)) => format!("{}%", fixed(n * 100.0, 2)),
        other => other.as_text(),
    }
}

/// Numeric-family cells are right aligned, text and dates left aligned
pub fn alignment(cell_type: CellType) -> HorizontalAlign {
    if cell_type.is_numeric() {
        HorizontalAlign::Right
    } else {
        HorizontalAlign::Left
    }
}

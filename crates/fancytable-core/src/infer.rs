//! Cell type inference for imported data.
//!
//! Each raw string is classified by the first matching rule:
//! empty, currency, percentage, plain number, calendar date, then text.
//! The patterns overlap, so the order matters.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

use crate::cell::{Cell, CellType, CellValue, Numeric};
use crate::format::{CellFormat, DEFAULT_CURRENCY};

fn currency_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$[0-9,]+(\.[0-9]{2})?$").expect("valid currency pattern"))
}

fn percentage_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?%$").expect("valid percentage pattern"))
}

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid number pattern"))
}

fn numeric_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)").expect("valid numeric prefix pattern")
    })
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
    "%A, %B %d, %Y",
];

/// Layouts without a day; the first of the month is implied
const YEAR_MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%b %Y", "%B %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Lenient calendar date check used during classification
pub fn is_date(raw: &str) -> bool {
    let s = raw.trim();
    if s.is_empty() {
        return false;
    }

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        || YEAR_MONTH_FORMATS.iter().any(|fmt| {
            NaiveDate::parse_from_str(&format!("{s} 1"), &format!("{fmt} %d")).is_ok()
        })
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
}

/// Lenient numeric parse: drop everything but digits, `.` and `-`, then read
/// the longest leading decimal number. `None` when no digits survive.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let m = numeric_prefix().find(&stripped)?;
    m.as_str().parse::<f64>().ok()
}

/// Classify a raw imported string
pub fn detect_cell_type(raw: &str) -> CellType {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return CellType::Text;
    }
    if currency_pattern().is_match(trimmed) {
        return CellType::Currency;
    }
    if percentage_pattern().is_match(trimmed) {
        return CellType::Percentage;
    }
    if number_pattern().is_match(trimmed) {
        return CellType::Number;
    }
    if is_date(trimmed) {
        return CellType::Date;
    }

    CellType::Text
}

/// Convert a raw string into a value of an already-decided type.
///
/// Numeric types fall back to the original string when parsing fails;
/// percentages are stored as fractions.
pub fn convert_value(raw: &str, cell_type: CellType) -> CellValue {
    let numeric = |scale: f64| match parse_lenient_number(raw) {
        Some(n) => Numeric::Parsed(n / scale),
        None => Numeric::Unparsed(raw.to_string()),
    };

    match cell_type {
        CellType::Text if raw.trim().is_empty() => CellValue::Text(String::new()),
        CellType::Text => CellValue::Text(raw.to_string()),
        CellType::Date => CellValue::Date(raw.to_string()),
        CellType::Number => CellValue::Number(numeric(1.0)),
        CellType::Currency => CellValue::Currency(numeric(1.0)),
        CellType::Percentage => CellValue::Percentage(numeric(100.0)),
    }
}

/// Build a cell from a raw imported string, attaching the default currency
/// format to currency cells
pub fn infer_cell_with_currency(raw: &str, currency: &str) -> Cell {
    let cell_type = detect_cell_type(raw);
    let cell = Cell::new(convert_value(raw, cell_type));

    if cell_type == CellType::Currency {
        cell.with_format(CellFormat::currency(currency))
    } else {
        cell
    }
}

/// Build a cell from a raw imported string (USD for currency cells)
pub fn infer_cell(raw: &str) -> Cell {
    infer_cell_with_currency(raw, DEFAULT_CURRENCY)
}

// 🧹 Cleaner - Schema check, type coercion, invalid/duplicate removal
//
// Dates are read day-first (01.02.2024 = 1 February). A value that can't be
// coerced becomes a missing cell and the row is dropped; only a missing
// column is fatal.

use crate::config::ReportConfig;
use crate::dataset::{Cell, Dataset};
use crate::error::ReportError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::{debug, warn};

// ============================================================================
// DATE / AMOUNT PARSING
// ============================================================================

// Order matters: two-digit years go first because %Y also accepts "24".
const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%y %H:%M",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%d.%m.%y",
    "%d/%m/%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

/// Parse a day-first date (optionally with time). `None` if nothing fits.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a plain decimal amount; NaN/inf count as unparseable
pub fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Years a spreadsheet date cell can hold (1900 date system)
pub const MIN_REPORT_YEAR: i32 = 1900;
pub const MAX_REPORT_YEAR: i32 = 9999;

pub fn is_reportable_date(dt: &NaiveDateTime) -> bool {
    (MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&dt.year())
}

// Out-of-range years count as invalid, same as unparseable text
fn coerce_date(cell: &Cell) -> Cell {
    let parsed = match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_date(s),
        _ => None,
    };

    parsed
        .filter(is_reportable_date)
        .map(Cell::DateTime)
        .unwrap_or(Cell::Missing)
}

fn coerce_amount(cell: &Cell) -> Cell {
    match cell {
        Cell::Number(n) if n.is_finite() => Cell::Number(*n),
        Cell::Text(s) => parse_amount(s).map(Cell::Number).unwrap_or(Cell::Missing),
        _ => Cell::Missing,
    }
}

// ============================================================================
// CLEANED DATASET
// ============================================================================

/// Dataset whose date column is all `DateTime` and amount column all `Number`,
/// with no fully identical rows.
#[derive(Debug, Clone, Default)]
pub struct CleanedDataset {
    dataset: Dataset,
    date_index: usize,
    amount_index: usize,
}

impl CleanedDataset {
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// (date, amount) for every row, in row order
    pub fn records(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.dataset.rows().iter().filter_map(move |row| {
            let date = row.get(self.date_index)?.as_datetime()?;
            let amount = row.get(self.amount_index)?.as_number()?;
            Some((date, amount))
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub input_rows: usize,
    pub invalid_rows: usize,
    pub duplicate_rows: usize,
}

impl CleaningStats {
    pub fn kept_rows(&self) -> usize {
        self.input_rows - self.invalid_rows - self.duplicate_rows
    }

    pub fn dropped_rows(&self) -> usize {
        self.invalid_rows + self.duplicate_rows
    }
}

// ============================================================================
// CLEANING
// ============================================================================

/// Fail fast if the configured date/amount columns are absent
pub fn check_required_columns(dataset: &Dataset, config: &ReportConfig) -> Result<(usize, usize), ReportError> {
    let date_index = dataset.column_index(&config.date_column);
    let amount_index = dataset.column_index(&config.amount_column);

    match (date_index, amount_index) {
        (Some(d), Some(a)) => Ok((d, a)),
        _ => {
            let mut missing = Vec::new();
            if date_index.is_none() {
                missing.push(config.date_column.clone());
            }
            if amount_index.is_none() {
                missing.push(config.amount_column.clone());
            }
            Err(ReportError::MissingColumns {
                missing,
                available: dataset.columns().to_vec(),
            })
        }
    }
}

pub fn clean(
    mut dataset: Dataset,
    config: &ReportConfig,
) -> Result<(CleanedDataset, CleaningStats), ReportError> {
    // Nothing was loaded at all: nothing to validate either
    if dataset.is_blank() {
        debug!("no input rows, skipping column check");
        return Ok((CleanedDataset::default(), CleaningStats::default()));
    }

    let (date_index, amount_index) = check_required_columns(&dataset, config)?;
    let input_rows = dataset.len();

    dataset.map_column(date_index, coerce_date);
    dataset.map_column(amount_index, coerce_amount);

    dataset.retain_rows(|row| !row[date_index].is_missing() && !row[amount_index].is_missing());
    let invalid_rows = input_rows - dataset.len();

    let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(dataset.len());
    let before_dedup = dataset.len();
    dataset.retain_rows(|row| seen.insert(row.clone()));
    let duplicate_rows = before_dedup - dataset.len();

    let stats = CleaningStats {
        input_rows,
        invalid_rows,
        duplicate_rows,
    };

    if stats.dropped_rows() > 0 {
        warn!(
            invalid = stats.invalid_rows,
            duplicates = stats.duplicate_rows,
            kept = stats.kept_rows(),
            "dropped rows during cleaning"
        );
    }

    Ok((
        CleanedDataset {
            dataset,
            date_index,
            amount_index,
        },
        stats,
    ))
}

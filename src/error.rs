// 🚨 Report Errors
// Typed failures the pipeline raises on purpose. Everything else (I/O, CSV
// syntax, XLSX serialization) bubbles up through anyhow with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Input data lacks the date and/or amount column.
    #[error(
        "Expected columns {} not found in data (available: {})",
        quote_list(.missing),
        quote_list(.available)
    )]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// A CSV file has no header row at all.
    #[error("File {} has no header row", .0.display())]
    NoHeader(PathBuf),

    /// A record carries more fields than its file's header names.
    #[error(
        "Failed to parse CSV line {line} in {}: expected at most {expected} fields, found {found}",
        .path.display()
    )]
    TooManyFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Sheet name rejected by spreadsheet naming rules.
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },
}

fn quote_list(items: &[String]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }

    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = ReportError::MissingColumns {
            missing: vec!["Сумма".to_string()],
            available: vec!["Дата".to_string(), "Товар".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Expected columns 'Сумма' not found in data (available: 'Дата', 'Товар')"
        );
    }

    #[test]
    fn test_missing_columns_without_available() {
        let err = ReportError::MissingColumns {
            missing: vec!["Дата".to_string(), "Сумма".to_string()],
            available: vec![],
        };

        assert!(err.to_string().contains("'Дата', 'Сумма'"));
        assert!(err.to_string().ends_with("(available: none)"));
    }

    #[test]
    fn test_no_header_names_file() {
        let err = ReportError::NoHeader(PathBuf::from("sample_data/empty.csv"));
        assert_eq!(err.to_string(), "File sample_data/empty.csv has no header row");
    }

    #[test]
    fn test_too_many_fields_message() {
        let err = ReportError::TooManyFields {
            path: PathBuf::from("sample_data/jan.csv"),
            line: 7,
            expected: 3,
            found: 5,
        };

        assert_eq!(
            err.to_string(),
            "Failed to parse CSV line 7 in sample_data/jan.csv: expected at most 3 fields, found 5"
        );
    }
}

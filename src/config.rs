// ⚙️ Report Configuration
// The two paths plus the naming conventions of the exported data.

use crate::error::ReportError;
use std::path::PathBuf;

/// Folder with the exported CSV files
pub const DEFAULT_INPUT_DIR: &str = "sample_data";

/// Report written on every run (overwritten)
pub const DEFAULT_OUTPUT_FILE: &str = "final_report.xlsx";

pub const DEFAULT_SHEET_NAME: &str = "Отчет";
pub const DEFAULT_DATE_COLUMN: &str = "Дата";
pub const DEFAULT_AMOUNT_COLUMN: &str = "Сумма";

/// Excel caps sheet names at 31 characters
const MAX_SHEET_NAME_CHARS: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub input_directory: PathBuf,
    pub output_path: PathBuf,
    pub sheet_name: String,
    pub date_column: String,
    pub amount_column: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input_directory: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            amount_column: DEFAULT_AMOUNT_COLUMN.to_string(),
        }
    }
}

impl ReportConfig {
    /// Config with explicit paths and default column/sheet names
    pub fn new(input_directory: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        ReportConfig {
            input_directory: input_directory.into(),
            output_path: output_path.into(),
            ..ReportConfig::default()
        }
    }

    /// Builder pattern: override sheet name
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Builder pattern: override the required column names
    pub fn with_columns(mut self, date_column: impl Into<String>, amount_column: impl Into<String>) -> Self {
        self.date_column = date_column.into();
        self.amount_column = amount_column.into();
        self
    }

    /// Check settings that would otherwise only fail after all the work is done
    pub fn validate(&self) -> Result<(), ReportError> {
        let name = self.sheet_name.as_str();
        let reason = if name.trim().is_empty() {
            Some("must not be blank".to_string())
        } else if name.chars().count() > MAX_SHEET_NAME_CHARS {
            Some(format!("longer than {} characters", MAX_SHEET_NAME_CHARS))
        } else if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
            Some(format!("contains forbidden character '{}'", c))
        } else if name.starts_with('\'') || name.ends_with('\'') {
            Some("must not start or end with an apostrophe".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ReportError::InvalidSheetName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

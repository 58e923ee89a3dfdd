// Daily Sales Report - Core Library
// CSV exports → cleaned dataset → per-day summary → XLSX

pub mod aggregator;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod writer;

// Re-export commonly used types
pub use aggregator::{aggregate_daily, DailyRow, DailySummary};
pub use cleaner::{clean, parse_amount, parse_date, CleanedDataset, CleaningStats};
pub use config::{
    ReportConfig, DEFAULT_AMOUNT_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_FILE, DEFAULT_SHEET_NAME,
};
pub use dataset::{Cell, Dataset};
pub use error::ReportError;
pub use loader::{load_directory, load_file, LoadedData};
pub use pipeline::{run, RunReport};
pub use writer::{write_report, REPORT_HEADERS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 🔗 Pipeline - Loader → Cleaner → Aggregator → Writer, once per run

use crate::aggregator::{aggregate_daily, DailySummary};
use crate::cleaner::{clean, CleaningStats};
use crate::config::ReportConfig;
use crate::loader::load_directory;
use crate::writer::write_report;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// What a run did, for the operator summary
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub files_loaded: Vec<PathBuf>,
    pub rows_loaded: usize,
    pub cleaning: CleaningStats,
    pub summary: DailySummary,
    pub output_path: PathBuf,
}

impl RunReport {
    pub fn days(&self) -> usize {
        self.summary.len()
    }
}

pub fn run(config: &ReportConfig) -> Result<RunReport> {
    config.validate()?;

    let loaded = load_directory(&config.input_directory)?;
    let rows_loaded = loaded.dataset.len();

    let (cleaned, cleaning) = clean(loaded.dataset, config)?;
    let summary = aggregate_daily(&cleaned);

    write_report(&summary, config)?;

    info!(
        files = loaded.files.len(),
        rows = rows_loaded,
        days = summary.len(),
        output = %config.output_path.display(),
        "report generated"
    );

    Ok(RunReport {
        files_loaded: loaded.files,
        rows_loaded,
        cleaning,
        summary,
        output_path: config.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::Path;
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
        config: ReportConfig,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("sample_data");
            fs::create_dir(&input).unwrap();
            let config = ReportConfig::new(&input, dir.path().join("final_report.xlsx"));
            Workspace { dir, config }
        }

        fn add_csv(&self, name: &str, content: &str) {
            fs::write(self.config.input_directory.join(name), content).unwrap();
        }
    }

    fn sheet_xml(path: &Path) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_run_two_day_scenario() {
        let ws = Workspace::new();
        ws.add_csv(
            "sales.csv",
            "Дата,Сумма\n2024-01-01,100\n2024-01-01,50\n2024-01-02,200\n",
        );

        let report = run(&ws.config).unwrap();

        assert_eq!(report.files_loaded.len(), 1);
        assert_eq!(report.rows_loaded, 3);
        assert_eq!(report.days(), 2);

        let jan1 = &report.summary.rows[0];
        assert_eq!(jan1.date.to_string(), "2024-01-01 00:00:00");
        assert_eq!((jan1.total, jan1.mean, jan1.count), (150.0, 75.0, 2));

        let jan2 = &report.summary.rows[1];
        assert_eq!(jan2.date.to_string(), "2024-01-02 00:00:00");
        assert_eq!((jan2.total, jan2.mean, jan2.count), (200.0, 200.0, 1));

        assert!(ws.config.output_path.exists());
    }

    #[test]
    fn test_run_empty_directory_writes_header_only() {
        let ws = Workspace::new();

        let report = run(&ws.config).unwrap();

        assert!(report.files_loaded.is_empty());
        assert_eq!(report.days(), 0);
        let sheet = sheet_xml(&ws.config.output_path);
        assert!(sheet.contains("<row r=\"1\""));
        assert!(!sheet.contains("<row r=\"2\""));
    }

    #[test]
    fn test_run_missing_column_fails_without_output() {
        let ws = Workspace::new();
        ws.add_csv("sales.csv", "Дата,Итого\n01.01.2024,100\n");

        let err = run(&ws.config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingColumns { .. })
        ));
        assert!(!ws.config.output_path.exists());
    }

    #[test]
    fn test_run_malformed_file_aborts() {
        let ws = Workspace::new();
        ws.add_csv("good.csv", "Дата,Сумма\n01.01.2024,100\n");
        ws.add_csv("broken.csv", "Дата,Сумма\n01.01.2024,1,2,3\n");

        assert!(run(&ws.config).is_err());
        assert!(!ws.config.output_path.exists());
    }

    #[test]
    fn test_run_drops_invalid_and_duplicate_rows() {
        let ws = Workspace::new();
        ws.add_csv(
            "jan.csv",
            "Дата,Сумма,Товар\n01.01.2024,100,Хлеб\n01.01.2024,100,Хлеб\nзавтра,40,Сыр\n02.01.2024,abc,Сыр\n",
        );
        ws.add_csv("feb.csv", "Дата,Сумма,Товар\n01.02.2024,30,Чай\n");

        let report = run(&ws.config).unwrap();

        assert_eq!(report.rows_loaded, 5);
        assert_eq!(report.cleaning.invalid_rows, 2);
        assert_eq!(report.cleaning.duplicate_rows, 1);
        assert_eq!(report.days(), 2);
        assert_eq!(report.summary.transaction_count(), 2);
        assert_eq!(report.summary.grand_total(), 130.0);
    }

    #[test]
    fn test_run_short_rows_padded_then_cleaned() {
        let ws = Workspace::new();
        ws.add_csv(
            "sales.csv",
            "Дата,Сумма,Товар\n01.01.2024,100\n02.01.2024\n02.01.2024,5,Чай\n",
        );

        let report = run(&ws.config).unwrap();

        assert_eq!(report.rows_loaded, 3);
        assert_eq!(report.cleaning.invalid_rows, 1);
        assert_eq!(report.days(), 2);
        assert_eq!(report.summary.rows[0].total, 100.0);
        assert_eq!(report.summary.rows[1].total, 5.0);
    }

    #[test]
    fn test_run_repeated_header_rows_not_merged() {
        let ws = Workspace::new();
        ws.add_csv(
            "sales.csv",
            "Дата,Сумма,Note,Note\n01.01.2024,100,x,b\n01.01.2024,100,y,b\n",
        );

        let report = run(&ws.config).unwrap();

        assert_eq!(report.cleaning.duplicate_rows, 0);
        assert_eq!(report.summary.rows[0].count, 2);
        assert_eq!(report.summary.rows[0].total, 200.0);
    }

    #[test]
    fn test_run_out_of_range_date_dropped_not_fatal() {
        let ws = Workspace::new();
        ws.add_csv("sales.csv", "Дата,Сумма\n01.01.1899,100\n01.01.2024,5\n");

        let report = run(&ws.config).unwrap();

        assert_eq!(report.cleaning.invalid_rows, 1);
        assert_eq!(report.days(), 1);
        assert_eq!(report.summary.rows[0].total, 5.0);
        assert!(ws.config.output_path.exists());
    }

    #[test]
    fn test_distinct_dates_match_valid_rows() {
        let ws = Workspace::new();
        ws.add_csv(
            "a.csv",
            "Дата,Сумма\n01.01.2024,1\n01.01.2024 10:00,2\n03.01.2024,3\n",
        );
        ws.add_csv("b.csv", "Дата,Сумма\n2024-01-03,4\n07.01.2024,5\n???,6\n");

        let report = run(&ws.config).unwrap();

        assert_eq!(report.days(), 3);
        for row in &report.summary.rows {
            assert!((row.mean - row.total / row.count as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_run_twice_is_idempotent() {
        let ws = Workspace::new();
        ws.add_csv(
            "sales.csv",
            "Дата,Сумма\n05.01.2024,10.5\n04.01.2024,3\n05.01.2024,4.5\n",
        );

        run(&ws.config).unwrap();
        let first = fs::read(&ws.config.output_path).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        run(&ws.config).unwrap();
        let second = fs::read(&ws.config.output_path).unwrap();

        assert_eq!(first, second);
        // keep the temp dir alive until here
        assert!(ws.dir.path().exists());
    }

    #[test]
    fn test_run_rejects_bad_sheet_name_before_reading() {
        let mut ws = Workspace::new();
        ws.config = ws.config.clone().with_sheet_name("a/b");
        // input dir that doesn't exist: the sheet check must fire first
        ws.config.input_directory = ws.dir.path().join("missing");

        let err = run(&ws.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InvalidSheetName { .. })
        ));
    }
}

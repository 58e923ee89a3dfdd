use anyhow::Result;
use sales_report::{run, ReportConfig, VERSION};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn setup_logging() {
    // Diagnostics only; RUST_LOG=debug shows per-file details
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let config = ReportConfig::default();

    println!("📥 Loading and processing data... (sales-report v{})", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:  {}", config.input_directory.display());

    let report = run(&config)?;

    println!(
        "✓ Loaded {} rows from {} file(s)",
        report.rows_loaded,
        report.files_loaded.len()
    );
    if report.cleaning.dropped_rows() > 0 {
        println!(
            "⚠️  Dropped {} invalid and {} duplicate row(s)",
            report.cleaning.invalid_rows, report.cleaning.duplicate_rows
        );
    }
    println!(
        "✓ Aggregated {} transactions into {} day(s)",
        report.summary.transaction_count(),
        report.days()
    );

    println!("✓ Grand total: {:.2}", report.summary.grand_total());

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✅ Report saved to {}", report.output_path.display());

    Ok(())
}

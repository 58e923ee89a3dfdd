// 📝 Writer - DailySummary → single-sheet XLSX workbook

use crate::aggregator::{DailyRow, DailySummary};
use crate::config::ReportConfig;
use anyhow::{Context, Result};
use chrono::Datelike;
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use tracing::debug;

/// Header row, in column order: date, total, mean ticket, transaction count
pub const REPORT_HEADERS: [&str; 4] = [
    "Дата",
    "Всего_продаж",
    "Средний_чек",
    "Количество_транзакций",
];

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DATE_COLUMN_WIDTH: f64 = 20.0;

// Pinned so unchanged input gives a byte-identical file
const CREATION_YMD: (u16, u8, u8) = (2000, 1, 1);

fn fixed_properties() -> Result<DocProperties> {
    let (year, month, day) = CREATION_YMD;
    let created = ExcelDateTime::from_ymd(year, month, day)?;
    Ok(DocProperties::new().set_creation_datetime(&created))
}

fn excel_date(row: &DailyRow) -> Result<ExcelDateTime> {
    let day = row.day();
    let year = u16::try_from(day.year())
        .with_context(|| format!("Year out of spreadsheet range: {}", day))?;

    ExcelDateTime::from_ymd(year, day.month() as u8, day.day() as u8)
        .with_context(|| format!("Date not representable in spreadsheet: {}", day))
}

fn write_header(worksheet: &mut Worksheet) -> Result<()> {
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (col, title) in REPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, summary: &DailySummary) -> Result<()> {
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    for (index, row) in summary.rows.iter().enumerate() {
        let excel_row = index as u32 + 1; // row 0 = header
        worksheet.write_datetime_with_format(excel_row, 0, &excel_date(row)?, &date_format)?;
        worksheet.write_number(excel_row, 1, row.total)?;
        worksheet.write_number(excel_row, 2, row.mean)?;
        worksheet.write_number(excel_row, 3, row.count as f64)?;
    }

    Ok(())
}

/// Write the summary to `config.output_path`, replacing any existing file
pub fn write_report(summary: &DailySummary, config: &ReportConfig) -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&fixed_properties()?);
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(config.sheet_name.as_str())
        .with_context(|| format!("Invalid sheet name: {}", config.sheet_name))?;
    worksheet.set_column_width(0, DATE_COLUMN_WIDTH)?;

    write_header(worksheet)?;
    write_rows(worksheet, summary)?;

    workbook
        .save(&config.output_path)
        .with_context(|| format!("Failed to write report: {}", config.output_path.display()))?;

    debug!(
        path = %config.output_path.display(),
        rows = summary.len(),
        "report written"
    );

    Ok(())
}

// 📂 Loader - Read every CSV export in a folder into one Dataset

use crate::dataset::{Cell, Dataset};
use crate::error::ReportError;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions treated as tabular exports (case-insensitive)
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["csv"];

/// Loader output: the combined table plus which files fed it
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub files: Vec<PathBuf>,
}

pub fn is_tabular_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// List the tabular files directly inside `dir`, sorted by path
pub fn find_tabular_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_tabular_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Make repeated header names unique: `Note, Note` → `Note, Note.1`
pub fn unique_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for header in headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while taken.contains(&name) {
            name = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}

/// Parse a single CSV file (first line = header).
///
/// Short records are padded with missing cells; records longer than the
/// header are a parse error.
pub fn load_file(file_path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(file_path)
        .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", file_path.display()))?
        .clone();

    if headers.is_empty() {
        return Err(ReportError::NoHeader(file_path.to_path_buf()).into());
    }

    let mut dataset = Dataset::new(unique_headers(headers.iter()));

    for (line_num, result) in reader.records().enumerate() {
        let line = line_num as u64 + 2; // 1-indexed + header row
        let record = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line, file_path.display())
        })?;

        if record.len() > headers.len() {
            return Err(ReportError::TooManyFields {
                path: file_path.to_path_buf(),
                line: record.position().map(|p| p.line()).unwrap_or(line),
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }

        dataset.push_row(record.iter().map(Cell::from_field).collect());
    }

    debug!(
        file = %file_path.display(),
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "loaded CSV file"
    );

    Ok(dataset)
}

/// Load and concatenate every tabular file in `dir`.
///
/// No files → blank dataset (no columns, no rows). Any unreadable or
/// malformed file aborts the whole load.
pub fn load_directory(dir: &Path) -> Result<LoadedData> {
    let files = find_tabular_files(dir)?;

    let mut dataset = Dataset::default();
    for file in &files {
        dataset.append(load_file(file)?);
    }

    debug!(
        dir = %dir.display(),
        files = files.len(),
        rows = dataset.len(),
        "input directory loaded"
    );

    Ok(LoadedData { dataset, files })
}

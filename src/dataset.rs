// 📊 Dataset - Generic tabular container
// Named columns + ordered rows of cells. Every stage before the aggregator
// works on this shape instead of a fixed record struct.

use chrono::NaiveDateTime;
use std::hash::{Hash, Hasher};

// ============================================================================
// CELL
// ============================================================================

/// One value in the table
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    DateTime(NaiveDateTime),
    Number(f64),
    Missing,
}

impl Cell {
    /// Raw CSV field → cell (empty field = missing, like an empty spreadsheet cell)
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

// Numbers compare by value; 0.0 and -0.0 count as the same amount.
fn number_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::DateTime(a), Cell::DateTime(b)) => a == b,
            (Cell::Number(a), Cell::Number(b)) => number_bits(*a) == number_bits(*b),
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Text(s) => s.hash(state),
            Cell::DateTime(dt) => dt.hash(state),
            Cell::Number(n) => number_bits(*n).hash(state),
            Cell::Missing => {}
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Dataset {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from string rows; short rows are padded with missing cells
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        let mut dataset = Dataset::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            let cells = row.iter().map(|field| Cell::from_field(field)).collect();
            dataset.push_row(cells);
        }
        dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when nothing was ever loaded into it (no header, no rows)
    pub fn is_blank(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row, normalized to the column count
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(cells);
    }

    /// Keep only rows matching the predicate, preserving order
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<Cell>) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Replace every cell of one column in place
    pub fn map_column<F>(&mut self, index: usize, mut convert: F)
    where
        F: FnMut(&Cell) -> Cell,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = convert(cell);
            }
        }
    }

    /// Concatenate another table below this one, aligning columns by name.
    ///
    /// Columns only `other` has are appended (existing rows get missing cells);
    /// columns only `self` has are missing in `other`'s rows.
    pub fn append(&mut self, other: Dataset) {
        let mut mapping = Vec::with_capacity(other.columns.len());
        for name in &other.columns {
            let index = match self.column_index(name) {
                Some(index) => index,
                None => {
                    self.columns.push(name.clone());
                    self.columns.len() - 1
                }
            };
            mapping.push(index);
        }

        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, Cell::Missing);
        }

        for row in other.rows {
            let mut cells = vec![Cell::Missing; width];
            for (cell, &target) in row.into_iter().zip(&mapping) {
                cells[target] = cell;
            }
            self.rows.push(cells);
        }
    }
}

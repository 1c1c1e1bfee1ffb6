use crate::domain::model::{Cell, Table};
use crate::domain::ports::WorkbookSource;
use crate::utils::error::{MenuError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Workbook on disk, read through calamine. The file is opened and fully
/// read on every `read_table` call, so nothing stays open between tables.
#[derive(Debug, Clone)]
pub struct CalamineWorkbook {
    path: PathBuf,
}

impl CalamineWorkbook {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn convert_value(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            // Serial date number, same as the cell's raw value
            Data::DateTime(dt) => Cell::Float(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }

    /// Rows anchored at A1: calamine ranges start at the first used cell, so
    /// leading empty rows and columns are restored.
    fn range_to_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
        let (start_row, start_col) = range.start().unwrap_or_default();
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];

        for data_row in range.rows() {
            let mut row = vec![Cell::Empty; start_col as usize];
            row.extend(data_row.iter().map(Self::convert_value));
            rows.push(row);
        }

        rows
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn read_table(&self, name: &str) -> Result<Table> {
        tracing::debug!("Opening workbook {}", self.path.display());
        let mut workbook = open_workbook_auto(&self.path)?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.iter().any(|sheet| sheet == name) {
            return Err(MenuError::TableNotFoundError {
                table: name.to_string(),
                available: sheet_names,
            });
        }

        let range = workbook.worksheet_range(name)?;
        let rows = Self::range_to_rows(&range);
        tracing::debug!("Read {} rows from sheet '{}'", rows.len(), name);

        Ok(Table::new(name, rows))
    }
}

/// Tables held in memory, keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    tables: HashMap<String, Table>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }
}

impl WorkbookSource for InMemoryWorkbook {
    fn read_table(&self, name: &str) -> Result<Table> {
        self.tables.get(name).cloned().ok_or_else(|| {
            let mut available: Vec<String> = self.tables.keys().cloned().collect();
            available.sort();
            MenuError::TableNotFoundError {
                table: name.to_string(),
                available,
            }
        })
    }
}

use std::cmp::min;
use std::collections::HashMap;
use std::ops::Range;

use crate::database::column::{Column, ColumnType};
use crate::spreadsheet::cell::{cell_position, Cell};
use crate::spreadsheet::SpreadsheetError;

/// One sheet read into memory: all cells plus the bounds of the used area.
///
/// This is the in-memory form the loader materializes into the database;
/// it is dropped as soon as the table has been populated.
#[derive(Debug)]
pub struct Sheet {
    /// Whether the first row holds column headers
    pub with_header: bool,
    /// Starting row index (0-based, inclusive)
    pub row_lower_bound: usize,
    /// Ending row index (0-based, inclusive)
    pub row_upper_bound: usize,
    /// Starting column index (0-based, inclusive)
    pub column_lower_bound: usize,
    /// Ending column index (0-based, inclusive)
    pub column_upper_bound: usize,
    /// All cells in the sheet
    pub cells: Vec<Cell>,
    /// Index mapping from (row, column) to cell vector position
    pub indexes: HashMap<(usize, usize), usize>,
}

impl Sheet {
    /// Gets the cell at a position, or None for holes and positions outside
    /// the used area.
    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        if self.row_lower_bound <= row
            && row <= self.row_upper_bound
            && self.column_lower_bound <= column
            && column <= self.column_upper_bound
        {
            self.indexes
                .get(&(row, column))
                .and_then(|index| self.cells.get(*index))
        } else {
            None
        }
    }

    /// Index range of the data rows, excluding the header row when present.
    pub fn data_rows(&self) -> Range<usize> {
        let first = self.row_lower_bound + if self.with_header { 1 } else { 0 };
        first..self.row_upper_bound + 1
    }

    /// Number of data rows, counting rows that are entirely empty but lie
    /// inside the used area.
    pub fn data_row_count(&self) -> usize {
        self.data_rows().len()
    }

    /// Number of columns in the used area.
    pub fn column_count(&self) -> usize {
        self.column_upper_bound - self.column_lower_bound + 1
    }

    /// Column names for the sheet.
    ///
    /// With headers enabled, reads the first row and renders every value as
    /// text; duplicate names are disambiguated with `_1`, `_2`, ... suffixes
    /// so they stay usable as SQL column names. Without headers, generates
    /// `column1`, `column2`, ...
    pub fn header(&self) -> Result<Vec<String>, SpreadsheetError> {
        if self.with_header && !self.cells.is_empty() {
            let names = (self.column_lower_bound..=self.column_upper_bound)
                .map(|column| {
                    self.get(self.row_lower_bound, column)
                        .ok_or(SpreadsheetError::MissingHeaderColumn {
                            position: cell_position(self.row_lower_bound, column),
                        })
                        .and_then(|cell| {
                            cell.get_varchar().ok_or(SpreadsheetError::InvalidCellValue {
                                position: cell_position(self.row_lower_bound, column),
                                message: "cast to varchar failed".to_string(),
                            })
                        })
                })
                .collect::<Result<Vec<String>, SpreadsheetError>>()?;
            Ok(deduplicate(names))
        } else if !self.with_header {
            Ok((0..self.column_count())
                .map(|index| format!("column{}", index + 1))
                .collect())
        } else {
            Err(SpreadsheetError::MissingHeaderRow)
        }
    }

    /// Infers a column type for every column by examining data rows.
    ///
    /// Only non-empty, non-error cells take part. A column is typed with the
    /// most specific kind all of its sampled cells share, in this order:
    /// Boolean, BigInt, Double, Time, Date, Timestamp; anything mixed and
    /// any column without usable cells falls back to Varchar. Empty cells
    /// never narrow a column's type and load as NULL.
    ///
    /// # Arguments
    ///
    /// * `rows` - Cap on the number of data rows to sample, or None for all
    ///
    /// # Returns
    ///
    /// * Ordered column definitions pairing header names with inferred types
    pub fn analyze_columns(&self, rows: Option<usize>) -> Result<Vec<Column>, SpreadsheetError> {
        let row_lower_bound = self.data_rows().start;
        let row_upper_bound = match rows {
            Some(rows) => min(row_lower_bound + rows, self.row_upper_bound + 1),
            None => self.row_upper_bound + 1,
        };

        self.header()?
            .into_iter()
            .zip(self.column_lower_bound..=self.column_upper_bound)
            .map(|(name, column)| {
                let cells: Vec<&Cell> = (row_lower_bound..row_upper_bound)
                    .filter_map(|row| self.get(row, column))
                    .filter(|cell| cell.is_varchar())
                    .collect();

                let kind = if cells.is_empty() {
                    ColumnType::Varchar
                } else if cells.iter().all(|cell| cell.is_bool()) {
                    ColumnType::Boolean
                } else if cells.iter().all(|cell| cell.is_bigint()) {
                    ColumnType::BigInt
                } else if cells.iter().all(|cell| cell.is_double()) {
                    ColumnType::Double
                } else if cells.iter().all(|cell| cell.is_time()) {
                    ColumnType::Time
                } else if cells.iter().all(|cell| cell.is_date()) {
                    ColumnType::Date
                } else if cells.iter().all(|cell| cell.is_datetime()) {
                    ColumnType::Timestamp
                } else {
                    ColumnType::Varchar
                };
                Ok(Column { name, kind })
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn from_rows(with_header: bool, rows: Vec<Vec<calamine::Data>>) -> Self {
        use calamine::DataType;

        let mut cells = Vec::new();
        let mut indexes = HashMap::new();
        let mut column_upper_bound = 0;
        for (row, record) in rows.iter().enumerate() {
            for (column, value) in record.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                column_upper_bound = column_upper_bound.max(column);
                indexes.insert((row, column), cells.len());
                cells.push(Cell {
                    row,
                    column,
                    value: value.clone(),
                });
            }
        }
        Sheet {
            with_header,
            row_lower_bound: 0,
            row_upper_bound: rows.len().saturating_sub(1),
            column_lower_bound: 0,
            column_upper_bound,
            cells,
            indexes,
        }
    }
}

/// Suffixes repeated names with `_1`, `_2`, ... keeping the first occurrence
/// untouched.
fn deduplicate(names: Vec<String>) -> Vec<String> {
    let mut seen = HashMap::<String, usize>::new();
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        let mut suffix = seen.get(&name).copied().unwrap_or(0);
        let mut unique = name.clone();
        while seen.contains_key(&unique) {
            suffix += 1;
            unique = format!("{name}_{suffix}");
        }
        seen.insert(name, suffix);
        seen.insert(unique.clone(), 0);
        result.push(unique);
    }
    result
}

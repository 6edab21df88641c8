//! # Spreadsheet Reading Module
//!
//! Reads one sheet of an Excel (.xlsx, .xlsm, .xlam, .xlsb, .xls, .xla) or
//! OpenDocument (.ods) file into memory. Provides a unified interface over
//! the per-format readers plus header extraction and column type inference
//! for the loaded data.

mod cell;
mod sheet;

pub use cell::{cell_position, Cell};
pub use sheet::Sheet;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{
    open_workbook, Data, DataRef, Ods, OdsError, Reader, Xls, XlsError, Xlsb, XlsbError, Xlsx,
    XlsxError,
};
use thiserror::Error;

/// Errors raised while opening files and extracting sheet data.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Error in Excel 2007+ format (.xlsx, .xlsm, .xlam)
    #[error("Invalid xlsx file format: {0}")]
    InvalidXlsxFileFormat(#[from] XlsxError),

    /// Error in Excel Binary format (.xlsb)
    #[error("Invalid xlsb file format: {0}")]
    InvalidXlsbFileFormat(#[from] XlsbError),

    /// Error in legacy Excel format (.xls, .xla)
    #[error("Invalid xls file format: {0}")]
    InvalidXlsFileFormat(#[from] XlsError),

    /// Error in OpenDocument format (.ods)
    #[error("Invalid ods file format: {0}")]
    InvalidOdsFileFormat(#[from] OdsError),

    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    /// Sheet exists but contains no cells at all
    #[error("Empty sheet or missing data")]
    EmptySheet,

    /// Header row expected but not found
    #[error("Missing header row")]
    MissingHeaderRow,

    /// Column header is missing or invalid
    #[error("Missing column name at '{position}'")]
    MissingHeaderColumn { position: String },

    /// Invalid cell value that cannot be converted to the expected type
    #[error("Invalid cell value at '{position}': {message}")]
    InvalidCellValue { position: String, message: String },
}

/// Type alias for buffered file reader
pub type FileReader = BufReader<File>;

/// Wrapper enum over the per-format spreadsheet readers.
pub enum Spreadsheet {
    // Cell-based readers (stream processing)
    /// Excel 2007+ format reader (.xlsx, .xlsm, .xlam)
    Xlsx(Xlsx<FileReader>),
    /// Excel Binary format reader (.xlsb)
    Xlsb(Xlsb<FileReader>),

    // Range-based readers (in-memory processing)
    /// Legacy Excel format reader (.xls, .xla)
    Xls(Xls<FileReader>),
    /// OpenDocument format reader (.ods)
    Ods(Ods<FileReader>),
}

impl std::fmt::Debug for Spreadsheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Xlsx(_) => "Xlsx",
            Self::Xlsb(_) => "Xlsb",
            Self::Xls(_) => "Xls",
            Self::Ods(_) => "Ods",
        };
        f.debug_tuple(name).finish()
    }
}

/// Streams all cells out of a cells-based reader into a Sheet.
macro_rules! cells_reader_to_sheet {
    ($with_header:expr, $reader:expr) => {{
        let mut row_lower_bound = usize::MAX;
        let mut row_upper_bound = 0;
        let mut column_lower_bound = usize::MAX;
        let mut column_upper_bound = 0;
        let mut cells: Vec<Cell> = Vec::new();
        let mut indexes: HashMap<(usize, usize), usize> = HashMap::new();

        while let Some(cell) = $reader.next_cell()? {
            let row = cell.get_position().0 as usize;
            row_lower_bound = row_lower_bound.min(row);
            row_upper_bound = row_upper_bound.max(row);

            let column = cell.get_position().1 as usize;
            column_lower_bound = column_lower_bound.min(column);
            column_upper_bound = column_upper_bound.max(column);

            indexes.insert((row, column), cells.len());
            cells.push(Cell {
                row,
                column,
                value: match cell.get_value() {
                    DataRef::Int(value) => Data::Int(*value),
                    DataRef::Float(value) => Data::Float(*value),
                    DataRef::String(value) => Data::String(value.to_owned()),
                    DataRef::SharedString(value) => Data::String(value.to_string()),
                    DataRef::Bool(value) => Data::Bool(*value),
                    DataRef::DateTime(value) => Data::DateTime(*value),
                    DataRef::DateTimeIso(value) => Data::DateTimeIso(value.to_owned()),
                    DataRef::DurationIso(value) => Data::DurationIso(value.to_owned()),
                    DataRef::Error(value) => Data::Error(value.to_owned()),
                    DataRef::Empty => Data::Empty,
                },
            });
        }

        if !cells.is_empty() {
            Ok(Sheet {
                with_header: $with_header,
                row_lower_bound,
                row_upper_bound,
                column_lower_bound,
                column_upper_bound,
                cells,
                indexes,
            })
        } else {
            Err(SpreadsheetError::EmptySheet)
        }
    }};
}

/// Extracts the used cells of a range-based reader into a Sheet.
macro_rules! extract_range {
    ($with_header:expr, $range:expr) => {
        if !$range.is_empty() {
            let start = $range
                .start()
                .map(|(row, column)| (row as usize, column as usize))
                .unwrap_or_default();
            let end = $range
                .end()
                .map(|(row, column)| (row as usize, column as usize))
                .unwrap_or_default();
            let mut cells: Vec<Cell> = Vec::new();
            let mut indexes: HashMap<(usize, usize), usize> = HashMap::new();

            for cell in $range.used_cells() {
                let row = start.0 + cell.0;
                let column = start.1 + cell.1;
                indexes.insert((row, column), cells.len());
                cells.push(Cell {
                    row,
                    column,
                    value: cell.2.to_owned(),
                })
            }
            Ok(Sheet {
                with_header: $with_header,
                row_lower_bound: start.0,
                row_upper_bound: end.0,
                column_lower_bound: start.1,
                column_upper_bound: end.1,
                cells,
                indexes,
            })
        } else {
            Err(SpreadsheetError::EmptySheet)
        }
    };
}

impl Spreadsheet {
    /// Opens a spreadsheet file, picking the reader from the file extension.
    ///
    /// Supported formats:
    /// - `.xlsx`, `.xlsm`, `.xlam` - Excel 2007+ format (cells reader)
    /// - `.xlsb` - Excel Binary format (cells reader)
    /// - `.xls`, `.xla` - Legacy Excel format (range reader)
    /// - `.ods` - OpenDocument format (range reader)
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not supported or the file cannot
    /// be opened or parsed.
    pub fn open<P>(path: P) -> Result<Spreadsheet, SpreadsheetError>
    where
        P: AsRef<Path>,
    {
        match path.as_ref().extension().and_then(OsStr::to_str) {
            Some("xlsx") | Some("xlsm") | Some("xlam") => Ok(Self::Xlsx(open_workbook(path)?)),
            Some("xlsb") => Ok(Self::Xlsb(open_workbook(path)?)),
            Some("xls") | Some("xla") => Ok(Self::Xls(open_workbook(path)?)),
            Some("ods") => Ok(Self::Ods(open_workbook(path)?)),
            _ => Err(SpreadsheetError::InvalidFileFormat {
                name: path.as_ref().to_string_lossy().to_string(),
            }),
        }
    }

    /// Reads one named sheet into memory.
    ///
    /// Cells-based formats are streamed cell by cell; range-based formats are
    /// extracted from the used range. A sheet without a single cell yields
    /// [`SpreadsheetError::EmptySheet`].
    pub fn open_sheet(
        &mut self,
        sheet_name: &str,
        with_header: bool,
    ) -> Result<Sheet, SpreadsheetError> {
        match self {
            Self::Xlsx(xlsx) => {
                let mut reader = xlsx.worksheet_cells_reader(sheet_name)?;
                cells_reader_to_sheet!(with_header, reader)
            }
            Self::Xlsb(xlsb) => {
                let mut reader = xlsb.worksheet_cells_reader(sheet_name)?;
                cells_reader_to_sheet!(with_header, reader)
            }
            Self::Xls(xls) => {
                let range = xls.worksheet_range(sheet_name)?;
                extract_range!(with_header, range)
            }
            Self::Ods(ods) => {
                let range = ods.worksheet_range(sheet_name)?;
                extract_range!(with_header, range)
            }
        }
    }
}

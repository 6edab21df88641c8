use thiserror::Error;

use crate::spreadsheet::SpreadsheetError;

/// Top-level error type for the loader.
///
/// One variant per failure kind, so callers can tell a missing input file
/// apart from an unreadable sheet, an empty sheet, or an engine failure
/// without inspecting message text.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The spreadsheet file path does not exist.
    #[error("spreadsheet file '{0}' was not found")]
    NotFound(String),

    /// The named sheet could not be read: missing sheet, corrupt file,
    /// unsupported format, or a cell that cannot be cast to its column type.
    #[error("{0}")]
    Sheet(#[from] SpreadsheetError),

    /// The sheet was read successfully but contains zero data rows.
    #[error("sheet '{sheet}' of '{file}' contains no data rows")]
    EmptyInput { file: String, sheet: String },

    /// The target table name is not a bare SQL identifier.
    #[error("invalid table name '{0}': must be alphanumeric or underscore and start with a letter or underscore")]
    InvalidTableName(String),

    /// Any failure reported by the database engine, surfaced as-is.
    #[error("{0}")]
    Engine(#[from] duckdb::Error),
}

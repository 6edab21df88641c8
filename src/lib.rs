//! # sheetload
//!
//! Loads a single spreadsheet sheet into a table of an embedded DuckDB
//! database file, creating the database when absent and replacing any prior
//! table of the same name.
//!
//! ## Features
//!
//! - **Multi-format input**: Excel files (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`,
//!   `.xla`, `.xlam`) and OpenDocument spreadsheet files (`.ods`)
//! - **Field type inference**: per-column detection of Boolean, BigInt,
//!   Double, Varchar, Timestamp, Date and Time data
//! - **Drop-and-recreate semantics**: the target table is replaced inside a
//!   single transaction, never merged or appended to
//! - **Load report**: row count and engine-reported schema after each load
//!
//! The sheet is read and validated before the database file is touched, so a
//! failed read never creates the database.

mod config;
mod database;
mod error;
mod loader;
mod spreadsheet;

#[cfg(test)]
mod testing;

pub use config::{LoadConfig, DEFAULT_DB_FILE};
pub use error::LoadError;
pub use loader::{load, LoadReport};
pub use spreadsheet::SpreadsheetError;

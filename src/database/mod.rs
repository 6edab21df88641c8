//! # Database Module
//!
//! The DuckDB side of a load: identifier handling, column typing, and
//! replacing the target table with freshly read sheet data.

pub mod column;
pub mod table;

pub use column::{Column, ColumnType};

use crate::error::LoadError;

/// Validates that a table name is a bare SQL identifier, since it is
/// interpolated into DROP/CREATE statements.
pub fn validate_table_name(table_name: &str) -> Result<(), LoadError> {
    let mut chars = table_name.chars();
    let Some(first) = chars.next() else {
        return Err(LoadError::InvalidTableName(table_name.to_owned()));
    };
    if !is_ident_start(first) || !chars.all(is_ident_continue) {
        return Err(LoadError::InvalidTableName(table_name.to_owned()));
    }
    Ok(())
}

fn is_ident_start(value: char) -> bool {
    value == '_' || value.is_ascii_alphabetic()
}

fn is_ident_continue(value: char) -> bool {
    is_ident_start(value) || value.is_ascii_digit()
}

/// Quotes an arbitrary column name for SQL, doubling embedded quotes.
/// Header cells can hold any text, so column names always go through this.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

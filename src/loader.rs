use std::path::Path;

use duckdb::Connection;
use tracing::info;

use crate::config::LoadConfig;
use crate::database::{self, table};
use crate::error::LoadError;
use crate::spreadsheet::{Spreadsheet, SpreadsheetError};

/// Summary of a completed load.
#[derive(Clone, Debug)]
pub struct LoadReport {
    /// Name of the table that was created.
    pub table: String,
    /// Row count of the created table, as counted by the engine.
    pub rows: usize,
    /// Ordered (column_name, sql_type) pairs, as the engine reports them.
    pub columns: Vec<(String, String)>,
}

/// Loads one sheet of a spreadsheet into a table of the database file,
/// creating the database when missing and replacing any prior table of the
/// same name.
///
/// The sheet is read and validated before the database is touched, so a
/// missing file, an unreadable sheet or an empty sheet never creates the
/// database file. The connection is scoped to this call and released on
/// success and failure alike.
pub fn load(config: &LoadConfig) -> Result<LoadReport, LoadError> {
    if !Path::new(&config.excel_file).exists() {
        return Err(LoadError::NotFound(config.excel_file.to_owned()));
    }

    let db_exists = Path::new(&config.db_file).exists();
    if db_exists {
        info!("connecting to existing database '{}'", config.db_file);
    } else {
        info!("database '{}' does not exist and will be created", config.db_file);
    }

    database::validate_table_name(&config.table_name)?;

    info!(
        "reading sheet '{}' from '{}'",
        config.sheet_name, config.excel_file
    );
    let mut spreadsheet = Spreadsheet::open(&config.excel_file)?;
    let sheet = match spreadsheet.open_sheet(&config.sheet_name, config.with_header) {
        Err(SpreadsheetError::EmptySheet) => return Err(empty_input(config)),
        result => result?,
    };
    if sheet.data_row_count() == 0 {
        return Err(empty_input(config));
    }
    let columns = sheet.analyze_columns(config.analyze_rows)?;

    let mut connection = Connection::open(&config.db_file)?;
    info!(
        "creating table '{}' and inserting {} rows",
        config.table_name,
        sheet.data_row_count()
    );
    table::replace_table(&mut connection, &config.table_name, &columns, &sheet)?;

    let rows = table::count_rows(&connection, &config.table_name)?;
    let columns = table::describe_table(&connection, &config.table_name)?;
    info!("loaded {} rows into '{}'", rows, config.table_name);

    Ok(LoadReport {
        table: config.table_name.to_owned(),
        rows,
        columns,
    })
}

fn empty_input(config: &LoadConfig) -> LoadError {
    LoadError::EmptyInput {
        file: config.excel_file.to_owned(),
        sheet: config.sheet_name.to_owned(),
    }
}

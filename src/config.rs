/// Database file used when the caller does not specify one.
pub const DEFAULT_DB_FILE: &str = "database.duckdb";

/// Parameters of one load operation.
#[derive(Clone, Debug)]
pub struct LoadConfig {
    /// Path to the spreadsheet file to read.
    pub excel_file: String,
    /// Name of the sheet to load.
    pub sheet_name: String,
    /// Name of the table to create in the database. Any existing table with
    /// this name is dropped and recreated.
    pub table_name: String,
    /// Path to the database file, opened if present and created otherwise.
    /// Defaults to [`DEFAULT_DB_FILE`].
    pub db_file: String,
    /// Treat the first row of the sheet as column headers. Defaults to true;
    /// when false, columns are named `column1`, `column2`, ...
    pub with_header: bool,
    /// Cap on the number of data rows sampled for column type inference.
    /// `None` (the default) analyzes every row.
    pub analyze_rows: Option<usize>,
}

impl LoadConfig {
    pub fn new(excel_file: &str, sheet_name: &str, table_name: &str) -> Self {
        Self {
            excel_file: excel_file.to_owned(),
            sheet_name: sheet_name.to_owned(),
            table_name: table_name.to_owned(),
            db_file: DEFAULT_DB_FILE.to_owned(),
            with_header: true,
            analyze_rows: None,
        }
    }
}

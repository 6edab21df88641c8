use chrono::{NaiveDate, Timelike};
use duckdb::types::{TimeUnit, Value};
use duckdb::{params_from_iter, Connection};
use tracing::debug;

use crate::database::column::{Column, ColumnType};
use crate::database::quote_identifier;
use crate::error::LoadError;
use crate::spreadsheet::{Cell, Sheet, SpreadsheetError};

/// Ordered (column_name, sql_type) pairs as reported by the engine.
pub type TableSchema = Vec<(String, String)>;

/// Replaces `table_name` with the sheet's data: drop if present, create with
/// the inferred columns, insert every data row. Runs inside one transaction
/// so a failed load never leaves a partial table behind.
pub fn replace_table(
    connection: &mut Connection,
    table_name: &str,
    columns: &[Column],
    sheet: &Sheet,
) -> Result<(), LoadError> {
    let transaction = connection.transaction()?;

    let drop_sql = format!("DROP TABLE IF EXISTS {table_name}");
    debug!("{drop_sql}");
    transaction.execute(&drop_sql, [])?;

    let fields = columns
        .iter()
        .map(|column| format!("{} {}", quote_identifier(&column.name), column.kind.sql_type()))
        .collect::<Vec<String>>()
        .join(", ");
    let create_sql = format!("CREATE TABLE {table_name} ({fields})");
    debug!("{create_sql}");
    transaction.execute(&create_sql, [])?;

    {
        let placeholders = vec!["?"; columns.len()].join(", ");
        let mut insert = transaction.prepare(&format!("INSERT INTO {table_name} VALUES ({placeholders})"))?;
        for row in sheet.data_rows() {
            let values = columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    match sheet.get(row, sheet.column_lower_bound + index) {
                        Some(cell) => cell_value(cell, column.kind),
                        None => Ok(Value::Null),
                    }
                })
                .collect::<Result<Vec<Value>, SpreadsheetError>>()?;
            insert.execute(params_from_iter(values))?;
        }
    }

    transaction.commit()?;
    Ok(())
}

/// Total row count of a table.
pub fn count_rows(connection: &Connection, table_name: &str) -> Result<usize, LoadError> {
    let count =
        connection.query_row(&format!("SELECT count(*) FROM {table_name}"), [], |row| {
            row.get::<_, i64>(0)
        })?;
    Ok(count as usize)
}

/// Ordered column names and types of a table, as the engine reports them.
pub fn describe_table(connection: &Connection, table_name: &str) -> Result<TableSchema, LoadError> {
    let mut statement =
        connection.prepare(&format!("PRAGMA table_info('{table_name}')"))?;
    let rows = statement.query_map([], |row| {
        Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
    })?;

    let mut schema = TableSchema::new();
    for row in rows {
        schema.push(row?);
    }
    Ok(schema)
}

/// Converts one cell to an engine value of the column's type. Empty cells
/// become NULL; error cells and values that do not fit the inferred type
/// fail the load.
fn cell_value(cell: &Cell, kind: ColumnType) -> Result<Value, SpreadsheetError> {
    if cell.is_empty() {
        return Ok(Value::Null);
    }
    if let Some(error) = cell.get_error() {
        return Err(error);
    }

    let value = match kind {
        ColumnType::Boolean => cell.get_bool().map(Value::Boolean),
        ColumnType::BigInt => cell.get_bigint().map(Value::BigInt),
        ColumnType::Double => cell.get_double().map(Value::Double),
        ColumnType::Varchar => cell.get_varchar().map(Value::Text),
        ColumnType::Timestamp => cell.get_datetime().map(|datetime| {
            Value::Timestamp(TimeUnit::Microsecond, datetime.and_utc().timestamp_micros())
        }),
        ColumnType::Date => cell.get_date().map(|date| {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch literal");
            Value::Date32(date.signed_duration_since(epoch).num_days() as i32)
        }),
        ColumnType::Time => cell.get_time().map(|time| {
            let micros = i64::from(time.num_seconds_from_midnight()) * 1_000_000
                + i64::from(time.nanosecond()) / 1_000;
            Value::Time64(TimeUnit::Microsecond, micros)
        }),
    };
    value.ok_or_else(|| SpreadsheetError::InvalidCellValue {
        position: cell.position(),
        message: format!("cast to {} failed", kind.sql_type()),
    })
}

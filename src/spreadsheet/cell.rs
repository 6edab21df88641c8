use calamine::{Data, DataType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::spreadsheet::SpreadsheetError;

/// Convert 0-based row & column indexes to an Excel-style cell position
/// such as "A1" or "AB12".
pub fn cell_position(row: usize, column: usize) -> String {
    let row = (row + 1).to_string();
    let mut column: u32 = column as u32 + 1;
    let mut position = String::from("");
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + column % 26).expect("Hardcode letters");
        column /= 26;
        position.insert(0, digit)
    }
    position.push_str(row.as_str());
    position
}

/// A single cell with its position and the value read from the file.
#[derive(Debug)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub column: usize,
    /// The actual cell data from the spreadsheet
    pub value: Data,
}

impl Cell {
    /// Excel-style position of this cell.
    pub fn position(&self) -> String {
        cell_position(self.row, self.column)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_bool(&self) -> bool {
        self.value.is_bool()
    }

    pub fn get_bool(&self) -> Option<bool> {
        self.value.get_bool()
    }

    /// True for native integers and for floats with no fractional part;
    /// spreadsheet formats store most numbers as doubles.
    pub fn is_bigint(&self) -> bool {
        self.value.is_int()
            || (self.value.is_float() && self.value.get_float().map(f64::fract) == Some(0.0))
    }

    pub fn get_bigint(&self) -> Option<i64> {
        match self.value {
            Data::Int(value) => Some(value),
            Data::Float(value) => Some(value as i64),
            _ => None,
        }
    }

    pub fn is_double(&self) -> bool {
        self.value.is_float() || self.value.is_int()
    }

    pub fn get_double(&self) -> Option<f64> {
        match self.value {
            Data::Int(value) => Some(value as f64),
            Data::Float(value) => Some(value),
            _ => None,
        }
    }

    /// True for every non-empty, non-error cell: any supported value can be
    /// rendered as text.
    pub fn is_varchar(&self) -> bool {
        !self.is_empty() && !self.is_error()
    }

    /// String representation of the cell value, with date/time values
    /// rendered according to their specific kind.
    pub fn get_varchar(&self) -> Option<String> {
        match &self.value {
            Data::Bool(value) => Some(value.to_string()),
            Data::Int(value) => Some(value.to_string()),
            Data::Float(value) => Some(value.to_string()),
            Data::String(value) => Some(value.to_owned()),
            Data::DateTime(_) => {
                if self.is_time() {
                    Some(self.get_time()?.to_string())
                } else if self.is_date() {
                    Some(self.get_date()?.to_string())
                } else {
                    Some(self.get_datetime()?.to_string())
                }
            }
            Data::DateTimeIso(value) => Some(value.to_owned()),
            Data::DurationIso(value) => Some(value.to_owned()),
            _ => None,
        }
    }

    pub fn is_datetime(&self) -> bool {
        self.value.is_datetime() || self.value.is_datetime_iso()
    }

    /// Datetime value of the cell, handling both the numeric serial
    /// representation and ISO strings with or without a time component.
    pub fn get_datetime(&self) -> Option<NaiveDateTime> {
        match &self.value {
            Data::DateTime(value) => value.as_datetime(),
            Data::DateTimeIso(value) => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.naive_local())
                .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                }),
            _ => None,
        }
    }

    /// True when the serial datetime has no time component.
    pub fn is_date(&self) -> bool {
        self.value.is_datetime()
            && self
                .value
                .get_datetime()
                .map(|value| value.as_f64().fract() == 0.0)
                .unwrap_or(false)
    }

    pub fn get_date(&self) -> Option<NaiveDate> {
        self.get_datetime().map(|datetime| datetime.date())
    }

    /// True when the serial datetime falls within the first day, which is
    /// how time-of-day values are stored.
    pub fn is_time(&self) -> bool {
        self.value.is_datetime()
            && self
                .value
                .get_datetime()
                .map(|value| value.as_f64() <= 1.0)
                .unwrap_or(false)
    }

    pub fn get_time(&self) -> Option<NaiveTime> {
        self.get_datetime().map(|datetime| datetime.time())
    }

    pub fn is_error(&self) -> bool {
        self.value.is_error()
    }

    /// Error value of the cell, carrying its position for the message.
    pub fn get_error(&self) -> Option<SpreadsheetError> {
        let error = self.value.get_error()?;
        Some(SpreadsheetError::InvalidCellValue {
            position: self.position(),
            message: error.to_string(),
        })
    }
}

mod delimited;
pub mod schema;
mod workbook;

pub use delimited::DelimitedReader;
pub use workbook::WorkbookReader;

use crate::errors::LoadError;

use schema::{COLUMN_CODE, COLUMN_COUNTRY, COLUMN_LOSS, COLUMN_YEAR};

/// Indices of the four required columns within one source file's header.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnMap {
    pub country: usize,
    pub code: usize,
    pub year: usize,
    pub loss: usize,
}

impl ColumnMap {
    /// Resolves the required columns by name, case-insensitively and
    /// ignoring surrounding whitespace. The first occurrence of a
    /// duplicated header wins.
    pub fn resolve<'a>(headers: impl Iterator<Item = &'a str>) -> Result<Self, LoadError> {
        let mut country = None;
        let mut code = None;
        let mut year = None;
        let mut loss = None;

        for (index, header) in headers.enumerate() {
            match header.trim().to_lowercase().as_str() {
                COLUMN_COUNTRY => {
                    country.get_or_insert(index);
                }
                COLUMN_CODE => {
                    code.get_or_insert(index);
                }
                COLUMN_YEAR => {
                    year.get_or_insert(index);
                }
                COLUMN_LOSS => {
                    loss.get_or_insert(index);
                }
                _ => {}
            }
        }

        Ok(Self {
            country: country.ok_or(LoadError::MissingColumn {
                column: COLUMN_COUNTRY,
            })?,
            code: code.ok_or(LoadError::MissingColumn {
                column: COLUMN_CODE,
            })?,
            year: year.ok_or(LoadError::MissingColumn {
                column: COLUMN_YEAR,
            })?,
            loss: loss.ok_or(LoadError::MissingColumn {
                column: COLUMN_LOSS,
            })?,
        })
    }
}

pub(crate) fn require_text(
    raw: &str,
    row: usize,
    column: &'static str,
) -> Result<String, LoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LoadError::Row {
            row,
            column,
            message: "value must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Accepts integer text, plus integral floats because spreadsheet
/// engines store every number as a float.
pub(crate) fn parse_year(raw: &str, row: usize) -> Result<i64, LoadError> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i64>() {
        return Ok(year);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.fract() == 0.0 && value.is_finite() {
            return Ok(value as i64);
        }
    }
    Err(LoadError::Row {
        row,
        column: COLUMN_YEAR,
        message: format!("'{trimmed}' is not an integer year"),
    })
}

pub(crate) fn parse_loss(raw: &str, row: usize) -> Result<f64, LoadError> {
    let trimmed = raw.trim();
    let value = trimmed.parse::<f64>().map_err(|_| LoadError::Row {
        row,
        column: COLUMN_LOSS,
        message: format!("'{trimmed}' is not a number"),
    })?;
    validate_loss(value, row)
}

pub(crate) fn validate_loss(value: f64, row: usize) -> Result<f64, LoadError> {
    if !value.is_finite() {
        return Err(LoadError::Row {
            row,
            column: COLUMN_LOSS,
            message: format!("'{value}' is not a finite number"),
        });
    }
    if value < 0.0 {
        return Err(LoadError::Row {
            row,
            column: COLUMN_LOSS,
            message: format!("forest loss {value} must not be negative"),
        });
    }
    Ok(value)
}

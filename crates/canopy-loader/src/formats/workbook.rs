use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::errors::LoadError;
use crate::model::{Dataset, Record};
use crate::registry::DatasetReader;

use super::schema::{COLUMN_CODE, COLUMN_COUNTRY, COLUMN_LOSS, COLUMN_YEAR};
use super::{parse_loss, parse_year, require_text, validate_loss, ColumnMap};

static EMPTY_CELL: Data = Data::Empty;

/// Spreadsheet reader for `.xlsx` and `.xls` workbooks. Only the first
/// worksheet is read.
pub struct WorkbookReader;

impl DatasetReader for WorkbookReader {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xls"]
    }

    fn read(&self, path: &Path) -> Result<Dataset, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;
        read_range(&range)
    }
}

fn read_range(range: &Range<Data>) -> Result<Dataset, LoadError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::MissingColumn {
        column: COLUMN_COUNTRY,
    })?;
    let header_text: Vec<String> = header.iter().map(cell_text).collect();
    let columns = ColumnMap::resolve(header_text.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (index, cells) in rows.enumerate() {
        records.push(parse_row(cells, &columns, index + 1)?);
    }
    Ok(Dataset::new(records))
}

fn parse_row(cells: &[Data], columns: &ColumnMap, row: usize) -> Result<Record, LoadError> {
    let country = require_text(&cell_text(cell(cells, columns.country)), row, COLUMN_COUNTRY)?;
    let code = require_text(&cell_text(cell(cells, columns.code)), row, COLUMN_CODE)?;
    let year = cell_year(cell(cells, columns.year), row)?;
    let forest_loss_ha = cell_loss(cell(cells, columns.loss), row)?;
    Ok(Record {
        country,
        code,
        year,
        forest_loss_ha,
    })
}

fn cell<'a>(cells: &'a [Data], index: usize) -> &'a Data {
    cells.get(index).unwrap_or(&EMPTY_CELL)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Spreadsheet engines store integers as floats, so an integral float
/// is accepted as a year; anything fractional is a schema violation.
fn cell_year(cell: &Data, row: usize) -> Result<i64, LoadError> {
    match cell {
        Data::Int(value) => Ok(*value),
        Data::Float(value) if value.fract() == 0.0 => Ok(*value as i64),
        Data::String(text) => parse_year(text, row),
        other => Err(LoadError::Row {
            row,
            column: COLUMN_YEAR,
            message: format!("cell '{other}' is not an integer year"),
        }),
    }
}

fn cell_loss(cell: &Data, row: usize) -> Result<f64, LoadError> {
    match cell {
        Data::Int(value) => validate_loss(*value as f64, row),
        Data::Float(value) => validate_loss(*value, row),
        Data::String(text) => parse_loss(text, row),
        other => Err(LoadError::Row {
            row,
            column: COLUMN_LOSS,
            message: format!("cell '{other}' is not a number"),
        }),
    }
}

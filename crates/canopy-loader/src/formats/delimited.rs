use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::LoadError;
use crate::model::{Dataset, Record};
use crate::registry::DatasetReader;

use super::schema::{COLUMN_CODE, COLUMN_COUNTRY};
use super::{parse_loss, parse_year, require_text, ColumnMap};

/// Comma-delimited reader for `.csv` and `.txt` files.
pub struct DelimitedReader;

impl DatasetReader for DelimitedReader {
    fn name(&self) -> &'static str {
        "delimited-text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv", "txt"]
    }

    fn read(&self, path: &Path) -> Result<Dataset, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        // An empty file yields an empty header record here, which then
        // fails column resolution; a header-only file yields no data
        // rows and an empty dataset.
        let headers = reader.headers()?.clone();
        let columns = ColumnMap::resolve(headers.iter())?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let raw = result?;
            records.push(parse_row(&raw, &columns, index + 1)?);
        }
        Ok(Dataset::new(records))
    }
}

fn parse_row(raw: &StringRecord, columns: &ColumnMap, row: usize) -> Result<Record, LoadError> {
    let country = require_text(field(raw, columns.country), row, COLUMN_COUNTRY)?;
    let code = require_text(field(raw, columns.code), row, COLUMN_CODE)?;
    let year = parse_year(field(raw, columns.year), row)?;
    let forest_loss_ha = parse_loss(field(raw, columns.loss), row)?;
    Ok(Record {
        country,
        code,
        year,
        forest_loss_ha,
    })
}

fn field<'a>(raw: &'a StringRecord, index: usize) -> &'a str {
    raw.get(index).unwrap_or("")
}

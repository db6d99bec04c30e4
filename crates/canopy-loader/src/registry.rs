use std::path::Path;

use crate::errors::LoadError;
use crate::formats::{DelimitedReader, WorkbookReader};
use crate::model::Dataset;

pub trait DatasetReader {
    fn name(&self) -> &'static str;
    fn extensions(&self) -> &'static [&'static str];
    fn read(&self, path: &Path) -> Result<Dataset, LoadError>;
}

/// Loads one dataset file, dispatching on the file extension
/// (case-insensitive). Content is never inspected for files whose
/// extension is not recognized.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimited = DelimitedReader;
    let workbook = WorkbookReader;
    let readers: [&dyn DatasetReader; 2] = [&delimited, &workbook];
    for reader in readers {
        if reader.extensions().contains(&extension.as_str()) {
            return reader.read(path);
        }
    }
    Err(LoadError::UnsupportedFormat { extension })
}

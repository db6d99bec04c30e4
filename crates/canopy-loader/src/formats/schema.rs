//! Canonical column names shared by every reader. Lookup is by name,
//! never by position, so source files may order columns freely.

pub const COLUMN_COUNTRY: &str = "pais";
pub const COLUMN_CODE: &str = "codigo";
pub const COLUMN_YEAR: &str = "año";
pub const COLUMN_LOSS: &str = "perdida_de_bosques_en_hectareas";

pub const REQUIRED_COLUMNS: [&str; 4] =
    [COLUMN_COUNTRY, COLUMN_CODE, COLUMN_YEAR, COLUMN_LOSS];

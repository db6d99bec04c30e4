use std::path::PathBuf;

use crate::errors::LoadError;
use crate::load_dataset;
use crate::model::Record;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn loads_csv_in_row_order() {
    let dataset = load_dataset(fixture("deforestation.csv")).expect("CSV load failed");

    assert_eq!(dataset.len(), 2);
    let records = dataset.records();
    assert_eq!(records[0].country, "Brazil");
    assert_eq!(records[0].code, "BRA");
    assert_eq!(records[0].year, 2021);
    assert_eq!(records[0].forest_loss_ha, 150000.75);
    assert_eq!(records[1].country, "Bolivia");
    assert_eq!(records[1].forest_loss_ha, 290000.5);
}

#[test]
fn txt_extension_uses_the_delimited_reader() {
    let dataset = load_dataset(fixture("notes.txt")).expect("TXT load failed");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].country, "Paraguay");
    assert_eq!(dataset.records()[0].year, 2022);
}

#[test]
fn extension_dispatch_is_case_insensitive() {
    let dataset = load_dataset(fixture("CASED.CSV")).expect("uppercase extension load failed");
    assert_eq!(dataset.len(), 2);
}

#[test]
fn column_order_in_the_source_file_is_irrelevant() {
    let dataset = load_dataset(fixture("shuffled_columns.csv")).expect("shuffled load failed");

    assert_eq!(dataset.len(), 2);
    let records = dataset.records();
    assert_eq!(records[0].country, "Peru");
    assert_eq!(records[0].code, "PER");
    assert_eq!(records[0].year, 2020);
    assert_eq!(records[0].forest_loss_ha, 5000.0);
    assert_eq!(records[1].country, "Ecuador");
    assert_eq!(records[1].forest_loss_ha, 0.0);
}

#[test]
fn header_lookup_ignores_case() {
    let dataset = load_dataset(fixture("upcase_headers.csv")).expect("upcase header load failed");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].code, "CHL");
}

#[test]
fn header_only_file_yields_an_empty_dataset() {
    let dataset = load_dataset(fixture("header_only.csv")).expect("header-only load failed");
    assert!(dataset.is_empty());
}

#[test]
fn completely_empty_file_is_a_schema_violation() {
    let err = load_dataset(fixture("empty.csv")).expect_err("empty file must not load");
    assert!(err.is_schema_violation(), "unexpected error: {err:?}");
    assert!(matches!(err, LoadError::MissingColumn { .. }));
}

#[test]
fn unsupported_extension_is_rejected_regardless_of_content() {
    // The fixture holds perfectly valid CSV text under a .parquet name.
    let err = load_dataset(fixture("wrong_format.parquet")).expect_err("must not load");
    match err {
        LoadError::UnsupportedFormat { extension } => assert_eq!(extension, "parquet"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn missing_file_is_reported_before_dispatch() {
    let err = load_dataset(fixture("does_not_exist.csv")).expect_err("must not load");
    assert!(matches!(err, LoadError::FileNotFound { .. }));
}

#[test]
fn non_numeric_year_fails_the_whole_load() {
    let err = load_dataset(fixture("bad_year.csv")).expect_err("bad year must not load");
    match err {
        LoadError::Row { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "año");
        }
        other => panic!("expected a row error, got {other:?}"),
    }
}

#[test]
fn negative_loss_fails_the_whole_load() {
    let err = load_dataset(fixture("negative_loss.csv")).expect_err("negative loss must not load");
    match err {
        LoadError::Row { row, column, .. } => {
            assert_eq!(row, 1);
            assert_eq!(column, "perdida_de_bosques_en_hectareas");
        }
        other => panic!("expected a row error, got {other:?}"),
    }
}

#[test]
fn missing_required_column_is_reported() {
    let err = load_dataset(fixture("missing_column.csv")).expect_err("must not load");
    match err {
        LoadError::MissingColumn { column } => assert_eq!(column, "codigo"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn xlsx_workbook_loads_typed_cells() {
    let dataset = load_dataset(fixture("deforestation.xlsx")).expect("XLSX load failed");

    assert_eq!(dataset.len(), 2);
    let records = dataset.records();
    assert_eq!(records[0].country, "Brazil");
    assert_eq!(records[0].code, "BRA");
    assert_eq!(records[0].year, 2021);
    assert_eq!(records[0].forest_loss_ha, 150000.75);
    assert_eq!(records[1].country, "Bolivia");
    assert_eq!(records[1].year, 2021);
    assert_eq!(records[1].forest_loss_ha, 290000.5);
}

#[test]
fn record_constructor_trims_and_validates() {
    let record = Record::new("  Brazil ", " BRA", 2021, 0.0).expect("record should be valid");
    assert_eq!(record.country, "Brazil");
    assert_eq!(record.code, "BRA");

    assert!(Record::new("", "BRA", 2021, 1.0).is_err());
    assert!(Record::new("Brazil", "  ", 2021, 1.0).is_err());
    assert!(Record::new("Brazil", "BRA", 2021, -0.1).is_err());
    assert!(Record::new("Brazil", "BRA", 2021, f64::NAN).is_err());
}

//! Loader behaviour against files on disk

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use nifty_dashboard::data::{load_datasets, DatasetError};
use nifty_dashboard::models::{CellValue, DatasetPaths, TableKind};

use crate::common::{fixtures, logging, write_file, TestDataDir};

#[test]
fn test_load_preserves_row_order_and_values() {
    logging::init_test_logging();
    let datasets = TestDataDir::new().load();

    let rows = datasets.quarterly.rows_for("Alpha Corp").expect("Alpha quarterly rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("Quarter"), Some(&CellValue::Text("Jun 2022".to_string())));
    assert_eq!(rows[1].get("Quarter"), Some(&CellValue::Text("Sep 2022".to_string())));
    // trailing zero kept as written
    assert_eq!(rows[1].get("Net Profit").map(ToString::to_string), Some("22.10".to_string()));
    assert!(rows[0].get("company_Name").is_none());

    let holders = datasets.shareholding.rows_for("Alpha Corp").expect("Alpha shareholding");
    let names: Vec<String> = holders
        .iter()
        .filter_map(|row| row.get("Holder").map(ToString::to_string))
        .collect();
    assert_eq!(names, vec!["Promoters", "FIIs", "Public"]);
}

#[test]
fn test_description_order_drives_company_names() {
    let datasets = TestDataDir::new().load();
    assert_eq!(
        datasets.company_names,
        vec!["Alpha Corp", "Beta Ltd", "Gamma Industries"]
    );

    let beta = datasets.profile("Beta Ltd").expect("Beta profile");
    assert_eq!(beta.description.to_string(), "Beta Ltd builds bridges, roads and ports.");
    let gamma = datasets.profile("Gamma Industries").expect("Gamma profile");
    assert!(gamma.stock_pe.is_empty());
}

#[test]
fn test_price_key_column_differs_from_other_files() {
    let datasets = TestDataDir::new().load();
    let alpha = datasets.prices.series_for("Alpha Corp").expect("Alpha prices");
    let closes: Vec<f64> = alpha.iter().map(|bar| bar.close).collect();
    assert_eq!(closes, vec![100.0, 102.0, 99.0]);
    assert!(datasets.prices.series_for("Gamma Industries").is_none());
}

#[test]
fn test_company_absent_from_a_table_is_not_an_error() {
    let datasets = TestDataDir::new().load();
    assert!(datasets.table(TableKind::Shareholding).rows_for("Beta Ltd").is_none());
    assert!(datasets.table(TableKind::Quarterly).rows_for("Gamma Industries").is_none());
}

#[test]
fn test_missing_file_is_fatal() {
    let data_dir = TestDataDir::with_files(&[
        (DatasetPaths::DESCRIPTION_FILE, fixtures::DESCRIPTION_CSV),
        (DatasetPaths::QUARTERS_FILE, fixtures::QUARTERS_CSV),
    ]);

    let result = load_datasets(&data_dir.config());
    assert_matches!(result, Err(DatasetError::MissingFile { path }) if path.ends_with(DatasetPaths::PROFIT_LOSS_FILE));
}

#[test]
fn test_missing_key_column_is_fatal() {
    let data_dir = TestDataDir::new();
    write_file(
        data_dir.path(),
        DatasetPaths::QUARTERS_FILE,
        "Company,Quarter,Sales\nAlpha Corp,Jun 2022,100\n",
    );

    let result = load_datasets(&data_dir.config());
    assert_matches!(result, Err(DatasetError::MissingColumn { column, .. }) if column == "company_Name");
}

#[test]
fn test_bad_price_number_reports_line() {
    let data_dir = TestDataDir::new();
    write_file(
        data_dir.path(),
        DatasetPaths::PRICE_FILE,
        "Company_Name,Date,Open,High,Low,Close,Volume\n\
         Alpha Corp,2022-03-01,99,101,98,100,120000\n\
         Alpha Corp,2022-03-02,100,103,99.5,n/a,95000\n",
    );

    let result = load_datasets(&data_dir.config());
    assert_matches!(
        result,
        Err(DatasetError::InvalidValue { line: 3, column, value, .. })
            if column == "Close" && value == "n/a"
    );
}

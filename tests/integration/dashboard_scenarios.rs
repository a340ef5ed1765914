//! End-to-end dashboard scenarios: load fixtures, change the selection,
//! check every region's payload.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_log::test;

use nifty_dashboard::models::{Selection, TableKind};
use nifty_dashboard::views::{evaluate_all, ChartSpec, CompanyText};
use nifty_dashboard::ui::DashboardApp;

use crate::common::{logging, TestDataDir};

#[test]
fn test_alpha_corp_scenario() {
    logging::init_test_logging();
    logging::log_test_step("Selecting Alpha Corp");

    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::company("Alpha Corp"), &datasets);

    assert_eq!(
        snapshot.text.description,
        "Alpha Corp:\nAlpha Corp makes alpha things."
    );
    assert!(snapshot.text.metrics.contains("Stock P/E: 25.3"));
    assert_eq!(
        snapshot.text.metrics,
        "Face Value: 10\nStock P/E: 25.3\nROE%: 18.2\nROCE%: 21.0\nMarket Cap: 150000\nDividend Yield%: 1.2"
    );

    let quarterly = snapshot.quarterly.as_ref().expect("quarterly table");
    assert_eq!(quarterly.heading, "Quarterly Results");
    assert_eq!(quarterly.caption, "Consolidated Figures in Rs. Crores");
    assert_eq!(quarterly.columns, vec!["Quarter", "Sales", "Expenses", "Net Profit"]);
    assert_eq!(quarterly.row_count(), 2);
    assert_eq!(quarterly.cell(0, "Quarter"), Some("Jun 2022"));
    assert_eq!(quarterly.cell(1, "Quarter"), Some("Sep 2022"));

    let profit_loss = snapshot.table(TableKind::ProfitLoss).expect("profit & loss table");
    assert_eq!(profit_loss.heading, "Profit & Loss");
    assert_eq!(
        profit_loss.caption,
        "For year march 2023\nConsolidated Figures in Rs. Crores"
    );

    let shareholding = snapshot.table(TableKind::Shareholding).expect("shareholding table");
    assert_eq!(shareholding.caption, "Numbers in percentages");
    assert_eq!(shareholding.cell(0, "Mar 2022"), Some("51.20"));
}

#[test]
fn test_price_line_follows_closes() {
    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::company("Alpha Corp"), &datasets);

    let line = snapshot.price_line.as_line().expect("line chart");
    assert_eq!(line.title, "Stock Prices for Alpha Corp");
    assert_eq!(line.x_label, "Date");
    assert_eq!(line.y_label, "Stock Price (Close)");
    assert_eq!(
        line.series.x,
        (1..=3)
            .map(|day| NaiveDate::from_ymd_opt(2022, 3, day).unwrap())
            .collect::<Vec<_>>()
    );
    assert_eq!(line.series.y, vec![100.0, 102.0, 99.0]);
}

#[test]
fn test_candlestick_matches_price_rows() {
    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::company("Alpha Corp"), &datasets);

    let chart = snapshot.candlestick.as_candlestick().expect("candlestick chart");
    assert_eq!(chart.title, "Candlestick Chart for Alpha Corp");
    assert_eq!(chart.volume_title, "Volume");
    assert!(chart.shared_x);
    assert!(!chart.range_slider);
    assert_eq!(chart.candles.len(), 3);
    assert_eq!(chart.volume.len(), 3);
    assert_eq!(
        chart.candles.iter().map(|c| c.is_up()).collect::<Vec<_>>(),
        vec![true, true, false]
    );
    assert_eq!(
        chart.volume.iter().map(|bar| bar.volume).collect::<Vec<_>>(),
        vec![120000.0, 95000.0, 143000.0]
    );
    for (candle, bar) in chart.candles.iter().zip(&chart.volume) {
        assert_eq!(candle.date, bar.date);
    }
}

#[test]
fn test_every_described_company_has_text() {
    let datasets = TestDataDir::new().load();
    for name in &datasets.company_names {
        let snapshot = evaluate_all(&Selection::company(name.as_str()), &datasets);
        assert!(!snapshot.text.is_placeholder(), "{} has no text", name);
        assert!(snapshot.text.description.starts_with(&format!("{}:", name)));
    }
}

#[test]
fn test_company_absent_from_tables_gets_empty_views() {
    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::company("Gamma Industries"), &datasets);

    assert!(!snapshot.text.is_placeholder());
    assert!(snapshot.text.metrics.contains("Stock P/E: \n"));
    for kind in TableKind::ALL {
        assert!(snapshot.table(kind).is_none(), "{} should be empty", kind);
    }
    assert_matches!(snapshot.price_line, ChartSpec::Empty);
    assert_matches!(snapshot.candlestick, ChartSpec::Empty);

    let beta = evaluate_all(&Selection::company("Beta Ltd"), &datasets);
    assert!(beta.quarterly.is_some());
    assert!(beta.shareholding.is_none());
}

#[test]
fn test_no_selection_yields_placeholders() {
    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::None, &datasets);

    assert_eq!(snapshot.text, CompanyText::placeholder());
    assert_eq!(snapshot.text.description, "Please select a company");
    assert_eq!(snapshot.text.metrics, "");
    assert!(snapshot.quarterly.is_none());
    assert!(snapshot.profit_loss.is_none());
    assert!(snapshot.shareholding.is_none());
    assert!(snapshot.price_line.is_empty());
    assert!(snapshot.candlestick.is_empty());
}

#[test]
fn test_unknown_company_is_no_data() {
    let datasets = TestDataDir::new().load();
    let snapshot = evaluate_all(&Selection::company("Delta Motors"), &datasets);
    assert_eq!(snapshot.text, CompanyText::placeholder());
    assert!(snapshot.price_line.is_empty());
}

#[test]
fn test_evaluation_is_idempotent() {
    let datasets = TestDataDir::new().load();
    let selection = Selection::company("Alpha Corp");
    assert_eq!(evaluate_all(&selection, &datasets), evaluate_all(&selection, &datasets));
}

#[test]
fn test_switching_back_reproduces_first_snapshot() {
    let datasets = TestDataDir::new().load();
    let mut app = DashboardApp::new(datasets.clone());

    let mut displayed = Vec::new();
    for name in ["Alpha Corp", "Beta Ltd", "Alpha Corp"] {
        logging::log_test_step(&format!("Selecting {}", name));
        app.select_company(name).unwrap();
        let shown = app.displayed_snapshot().expect("all six panels registered");
        assert_eq!(shown, evaluate_all(app.current(), &datasets));
        displayed.push(shown);
    }

    assert_ne!(displayed[0], displayed[1]);
    assert_eq!(displayed[0], displayed[2]);
}

#[test]
fn test_snapshot_exports_as_json() {
    let datasets = TestDataDir::new().load();
    let json = evaluate_all(&Selection::company("Alpha Corp"), &datasets)
        .to_json_pretty()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["selection"]["Company"], "Alpha Corp");
    assert_eq!(value["price_line"]["type"], "line");
    assert_eq!(value["candlestick"]["type"], "candlestick");
    assert_eq!(value["candlestick"]["volume_color"], "rgba(0, 0, 255, 0.5)");
    assert_eq!(value["quarterly"]["rows"][1][0], "Sep 2022");
}

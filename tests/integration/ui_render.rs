//! Headless rendering of the full dashboard

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use test_log::test;

use nifty_dashboard::ui::events::AppAction;
use nifty_dashboard::ui::DashboardApp;

use crate::common::TestDataDir;

fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(app: &DashboardApp) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 60)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    buffer_text(terminal.backend().buffer())
}

#[test]
fn test_initial_screen_shows_placeholder() {
    let app = DashboardApp::new(TestDataDir::new().load());
    let screen = render(&app);

    assert!(screen.contains("Nifty 50"));
    assert!(screen.contains("Please select a company"));
    assert!(screen.contains("Alpha Corp"));
    assert!(screen.contains("Gamma Industries"));
    assert!(screen.contains("Ready - no company selected"));
    assert!(!screen.contains("Quarterly Results ("));
}

#[test]
fn test_selected_company_renders_tables() {
    let mut app = DashboardApp::new(TestDataDir::new().load());
    app.select_company("Alpha Corp").unwrap();
    let screen = render(&app);

    assert!(screen.contains("Alpha Corp:"));
    assert!(screen.contains("Stock P/E: 25.3"));
    assert!(screen.contains("Quarterly Results (1/2)"));
    assert!(screen.contains("Profit & Loss"));
    assert!(screen.contains("Shareholding Pattern"));
    assert!(screen.contains("Sep 2022"));
    assert!(screen.contains("Showing Alpha Corp"));
}

#[test]
fn test_chart_pages_render_titles() {
    let mut app = DashboardApp::new(TestDataDir::new().load());
    app.select_company("Alpha Corp").unwrap();

    app.handle_action(AppAction::NextPage).unwrap();
    let price = render(&app);
    assert!(price.contains("Stock Prices for Alpha Corp"));
    assert!(price.contains("2022-03-01"));

    app.handle_action(AppAction::NextPage).unwrap();
    let candles = render(&app);
    assert!(candles.contains("Candlestick Chart for Alpha Corp"));
    assert!(candles.contains("Volume (max 143.0K)"));
}

#[test]
fn test_scrolling_focused_table() {
    let mut app = DashboardApp::new(TestDataDir::new().load());
    app.select_company("Alpha Corp").unwrap();
    app.handle_action(AppAction::FocusNext).unwrap();
    app.handle_action(AppAction::FocusNext).unwrap();
    app.handle_action(AppAction::Scroll(crossterm::event::KeyCode::PageDown))
        .unwrap();

    let screen = render(&app);
    assert!(screen.contains("Shareholding Pattern (3/3)"));
    assert!(screen.contains("Quarterly Results (1/2)"));
}

#[test]
fn test_table_scroll_resets_when_selection_changes() {
    let mut app = DashboardApp::new(TestDataDir::new().load());
    app.select_company("Alpha Corp").unwrap();
    app.handle_action(AppAction::FocusPrevious).unwrap();
    app.handle_action(AppAction::Scroll(crossterm::event::KeyCode::End))
        .unwrap();
    assert!(render(&app).contains("Shareholding Pattern (3/3)"));

    app.select_company("Beta Ltd").unwrap();
    app.select_company("Alpha Corp").unwrap();
    assert!(render(&app).contains("Shareholding Pattern (1/3)"));
}

//! The six dashboard panels. Each one owns the latest payload of its binder
//! and recomputes it from the shared datasets when the selection changes.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::models::{Datasets, Selection, TableKind};
use crate::ui::charts::{render_candlestick, render_line_chart};
use crate::ui::components::{
    render_labelled_lines, render_placeholder, render_table_view, render_text_block,
};
use crate::ui::state::StateUpdate;
use crate::ui::view::{PanelPayload, View};
use crate::views::{
    bind_candlestick, bind_company_text, bind_price_line, bind_table, ChartSpec, CompanyText,
    TableView,
};

const SCROLL_STEP: usize = 5;

fn selection_of(update: &StateUpdate) -> &Selection {
    match update {
        StateUpdate::SelectionChanged { selection } => selection,
    }
}

/// Description (left) and key metrics (right)
pub struct CompanyTextPanel {
    data: Arc<Datasets>,
    text: CompanyText,
}

impl CompanyTextPanel {
    pub fn new(data: Arc<Datasets>) -> Self {
        let text = bind_company_text(&Selection::None, &data.profiles);
        Self { data, text }
    }
}

impl View for CompanyTextPanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
            .split(area);

        let placeholder = self.text.is_placeholder();
        render_text_block(f, chunks[0], "Company", &self.text.description, !placeholder);
        render_labelled_lines(f, chunks[1], "Key Metrics", &self.text.metrics);
    }

    fn payload(&self) -> PanelPayload<'_> {
        PanelPayload::Text(&self.text)
    }

    fn get_status(&self) -> String {
        self.text.description.lines().next().unwrap_or_default().to_string()
    }

    fn handle_state_update(&mut self, update: &StateUpdate) -> Result<bool> {
        self.text = bind_company_text(selection_of(update), &self.data.profiles);
        Ok(true)
    }
}

/// One of the three scrollable company tables
pub struct TablePanel {
    data: Arc<Datasets>,
    kind: TableKind,
    view: Option<TableView>,
    offset: usize,
    focused: bool,
}

impl TablePanel {
    pub fn new(data: Arc<Datasets>, kind: TableKind) -> Self {
        let view = bind_table(&Selection::None, data.table(kind));
        Self {
            data,
            kind,
            view,
            offset: 0,
            focused: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.view
            .as_ref()
            .map(|view| view.row_count().saturating_sub(1))
            .unwrap_or(0)
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.offset as isize + delta;
        self.offset = (target.max(0) as usize).min(self.max_offset());
    }
}

impl View for TablePanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        match &self.view {
            Some(view) => render_table_view(f, area, view, self.offset, self.focused),
            // empty view: no heading, no table
            None => render_placeholder(f, area, "", ""),
        }
    }

    fn payload(&self) -> PanelPayload<'_> {
        PanelPayload::Table(self.view.as_ref())
    }

    fn get_status(&self) -> String {
        match &self.view {
            Some(view) => format!("{}: {} rows", view.heading, view.row_count()),
            None => format!("{}: no data", self.kind.heading()),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::PageDown => self.scroll_by(SCROLL_STEP as isize),
            KeyCode::PageUp => self.scroll_by(-(SCROLL_STEP as isize)),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.max_offset(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn handle_state_update(&mut self, update: &StateUpdate) -> Result<bool> {
        self.view = bind_table(selection_of(update), self.data.table(self.kind));
        self.offset = 0;
        Ok(true)
    }
}

/// Close price over time
pub struct PriceLinePanel {
    data: Arc<Datasets>,
    spec: ChartSpec,
}

impl PriceLinePanel {
    pub fn new(data: Arc<Datasets>) -> Self {
        let spec = bind_price_line(&Selection::None, &data.prices);
        Self { data, spec }
    }
}

impl View for PriceLinePanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        match self.spec.as_line() {
            Some(line) => render_line_chart(f, area, line),
            None => render_placeholder(f, area, "Stock Prices", ""),
        }
    }

    fn payload(&self) -> PanelPayload<'_> {
        PanelPayload::Chart(&self.spec)
    }

    fn get_status(&self) -> String {
        match self.spec.as_line() {
            Some(line) => format!("{} points", line.series.y.len()),
            None => "No price data".to_string(),
        }
    }

    fn handle_state_update(&mut self, update: &StateUpdate) -> Result<bool> {
        self.spec = bind_price_line(selection_of(update), &self.data.prices);
        Ok(true)
    }
}

/// OHLC candles with volume underneath
pub struct CandlestickPanel {
    data: Arc<Datasets>,
    spec: ChartSpec,
}

impl CandlestickPanel {
    pub fn new(data: Arc<Datasets>) -> Self {
        let spec = bind_candlestick(&Selection::None, &data.prices);
        Self { data, spec }
    }
}

impl View for CandlestickPanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        match self.spec.as_candlestick() {
            Some(candles) => render_candlestick(f, area, candles),
            None => render_placeholder(f, area, "Candlestick", ""),
        }
    }

    fn payload(&self) -> PanelPayload<'_> {
        PanelPayload::Chart(&self.spec)
    }

    fn get_status(&self) -> String {
        match self.spec.as_candlestick() {
            Some(candles) => format!("{} candles", candles.candles.len()),
            None => "No price data".to_string(),
        }
    }

    fn handle_state_update(&mut self, update: &StateUpdate) -> Result<bool> {
        self.spec = bind_candlestick(selection_of(update), &self.data.prices);
        Ok(true)
    }
}

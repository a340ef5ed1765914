//! View binders: pure functions from the current selection and the loaded
//! datasets to the payload each dashboard region displays.
//!
//! Binders never mutate shared state and never read each other's output, so
//! they can run in any order.

pub mod charts;
pub mod description;
pub mod tables;

use serde::Serialize;

use crate::models::{Datasets, Selection, TableKind};

pub use charts::{bind_candlestick, bind_price_line, ChartSpec};
pub use description::{bind_company_text, CompanyText};
pub use tables::{bind_table, TableView};

/// Payloads for all six regions for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub selection: Selection,
    pub text: CompanyText,
    pub quarterly: Option<TableView>,
    pub profit_loss: Option<TableView>,
    pub shareholding: Option<TableView>,
    pub price_line: ChartSpec,
    pub candlestick: ChartSpec,
}

impl DashboardSnapshot {
    pub fn table(&self, kind: TableKind) -> Option<&TableView> {
        match kind {
            TableKind::Quarterly => self.quarterly.as_ref(),
            TableKind::ProfitLoss => self.profit_loss.as_ref(),
            TableKind::Shareholding => self.shareholding.as_ref(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluate every binder for the given selection
pub fn evaluate_all(selection: &Selection, data: &Datasets) -> DashboardSnapshot {
    DashboardSnapshot {
        selection: selection.clone(),
        text: bind_company_text(selection, &data.profiles),
        quarterly: bind_table(selection, &data.quarterly),
        profit_loss: bind_table(selection, &data.profit_loss),
        shareholding: bind_table(selection, &data.shareholding),
        price_line: bind_price_line(selection, &data.prices),
        candlestick: bind_candlestick(selection, &data.prices),
    }
}

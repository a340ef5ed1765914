//! Terminal render surface: one ratatui panel per dashboard region, all
//! driven by the shared selection state.

pub mod app;
pub mod charts;
pub mod components;
pub mod events;
pub mod layout;
pub mod panels;
pub mod selector;
pub mod state;
pub mod view;

pub use app::{run_app, DashboardApp};

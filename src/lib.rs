pub mod data;
pub mod models;
pub mod ui;
pub mod views;

//! Startup loading of the static company datasets

pub mod error;
pub mod loader;

pub use error::{DatasetError, DatasetResult};
pub use loader::{load_datasets, DatasetLoader};

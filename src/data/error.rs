use std::path::PathBuf;

/// Startup failures while reading the source tables. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{}: missing expected column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: line {line}: invalid value '{value}' in column '{column}'", path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DatasetResult<T> = Result<T, DatasetError>;

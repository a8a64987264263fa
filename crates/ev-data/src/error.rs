use thiserror::Error;

use ev_core::EvError;
use ev_network::NetworkError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{file}: {message}")]
    Parse { file: String, message: String },

    #[error("{file}: unknown village {name:?}")]
    UnknownVillage { file: String, name: String },

    #[error("missing column containing {0:?}")]
    MissingColumn(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Sheet(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] EvError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type DataResult<T> = Result<T, DataError>;

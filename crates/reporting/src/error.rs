use std::path::PathBuf;
use thiserror::Error;

/// A failure to produce one output artifact. Other artifacts and the printed
/// summary are unaffected.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write '{path}': {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: dataset::DatasetError,
    },

    #[error("Could not write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

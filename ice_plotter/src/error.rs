use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("file {} does not exist", .path.display())]
    MissingSummaryFile { path: PathBuf },

    #[error("{}: ICE value {value:?} for label {label:?} is neither an integer nor \"None\"", .path.display())]
    MalformedScore {
        path: PathBuf,
        label: String,
        value: String,
    },

    #[error("{}: label {label:?} is not of the form <gene>-<sample>", .path.display())]
    MalformedLabel { path: PathBuf, label: String },

    #[error("{}: first column must be {column:?}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(
        "{requested} samples but only {available} marker/color combinations ({} over budget)",
        .requested - .available
    )]
    EncodingOverflow { requested: usize, available: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error("rendering failed: {0}")]
    Render(String),
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io { path: path.into(), source }
    }

    pub fn render(e: impl std::fmt::Display) -> Self {
        PlotError::Render(e.to_string())
    }
}

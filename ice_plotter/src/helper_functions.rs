use std::fs;
use std::path::{Path, PathBuf};

use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{CsvReadOptions, SerReader};

use crate::error::{PlotError, PlotResult};

/// Read a delimited file with a header row. Every column is kept as a string
/// so that cell classification happens in one place, downstream.
pub fn read_delimited_as_strings(file_path: &Path, separator: u8) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))?
        .finish()
}

pub fn ensure_parent_dir(path: &Path) -> PlotResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| PlotError::io(parent, e))
        }
        _ => Ok(()),
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::analysis::feature_selection::{DEFAULT_THRESHOLD, DEFAULT_TOP_N};
use crate::plotting::encodings::OverflowPolicy;

pub const SUMMARY_FNAME: &str = "summary.csv";
pub const DEFAULT_OUTPUT: &str = "plot.svg";

/// Plot ICE editing efficiency per gene for every sample of a genotyping run.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory holding one sub-directory per gene
    #[arg(short = 'r', long = "root-dir")]
    pub root_dir: PathBuf,

    /// Name of the ICE summary file inside every gene directory
    #[arg(long = "summary-filename", default_value = SUMMARY_FNAME)]
    pub summary_filename: String,

    /// Output SVG path (overwritten if it exists)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output_path: PathBuf,

    /// Use the 10-colour hex palette instead of the 7 base colours
    #[arg(long = "extended-palette")]
    pub use_extended_palette: bool,

    /// Keep gene names as written instead of stripping the SPL prefix
    #[arg(long = "no-abbreviate", action = clap::ArgAction::SetFalse)]
    pub abbreviate_names: bool,

    /// Wide tab-separated summary; when given, only its top samples are plotted
    #[arg(short = 'b', long = "brief-summary")]
    pub brief_summary: Option<PathBuf>,

    /// Minimum ICE value counted as a successful edit when ranking samples
    #[arg(short = 't', long = "threshold", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: i64,

    /// Number of samples kept from the brief summary
    #[arg(short = 'n', long = "top-n", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// What to do with samples beyond the available marker/colour combinations
    #[arg(long = "overflow", value_enum, default_value_t = OverflowPolicy::Truncate)]
    pub overflow: OverflowPolicy,
}

impl Config {
    #[cfg(test)]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            summary_filename: SUMMARY_FNAME.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            use_extended_palette: false,
            abbreviate_names: true,
            brief_summary: None,
            threshold: DEFAULT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

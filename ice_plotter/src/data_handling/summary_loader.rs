use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::{PlotError, PlotResult};

/// Collect `<gene dir>/<summary_filename>` for every gene directory under
/// `root_dir`, sorted by directory path.
///
/// Fails on the first gene directory without a summary file, so callers never
/// see a partial list.
pub fn list_summary_paths(root_dir: &Path, summary_filename: &str) -> PlotResult<Vec<PathBuf>> {
    info!("Listing gene directories under {}", root_dir.display());

    let entries = fs::read_dir(root_dir).map_err(|e| PlotError::io(root_dir, e))?;
    let mut gene_dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PlotError::io(root_dir, e))?.path();
        if path.is_dir() {
            gene_dirs.push(path);
        } else {
            debug!("Skipping non-directory entry {}", path.display());
        }
    }
    gene_dirs.sort();

    let mut summary_paths = Vec::with_capacity(gene_dirs.len());
    for gene_dir in gene_dirs {
        let summary_path = gene_dir.join(summary_filename);
        if !summary_path.is_file() {
            error!("Missing summary file {}", summary_path.display());
            return Err(PlotError::MissingSummaryFile { path: summary_path });
        }
        summary_paths.push(summary_path);
    }

    info!("Found {} summary files", summary_paths.len());
    Ok(summary_paths)
}

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PlotError, PlotResult};
use crate::helper_functions::read_delimited_as_strings;

pub const SAMPLE_COLUMN: &str = "Sample";

/// Wide "brief summary" table: one row per sample, one column per gene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    pub path: PathBuf,
    /// Gene column headers, in file order, as written.
    pub genes: Vec<String>,
    pub rows: Vec<WideRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub sample: String,
    /// One entry per `WideTable::genes`; `None` for a blank cell.
    pub cells: Vec<Option<String>>,
}

impl WideRow {
    pub fn iter_cells<'a>(&'a self, genes: &'a [String]) -> impl Iterator<Item = (&'a str, Option<&'a str>)> {
        genes
            .iter()
            .zip(self.cells.iter())
            .map(|(gene, cell)| (gene.as_str(), cell.as_deref()))
    }
}

pub struct BriefSummary {
    pub path: PathBuf,
}

impl BriefSummary {
    pub fn load(&self) -> PlotResult<WideTable> {
        read_brief_summary(&self.path)
    }
}

pub fn read_brief_summary(path: &Path) -> PlotResult<WideTable> {
    info!("Reading brief summary from {}", path.display());
    let df = read_delimited_as_strings(path, b'\t')?;

    let columns: Vec<String> = df.get_column_names().iter().map(|c| c.to_string()).collect();
    if columns.first().map(String::as_str) != Some(SAMPLE_COLUMN) {
        return Err(PlotError::MissingColumn {
            path: path.to_path_buf(),
            column: SAMPLE_COLUMN.to_string(),
        });
    }
    let genes: Vec<String> = columns.into_iter().skip(1).collect();

    let sample_col = df.column(SAMPLE_COLUMN)?.clone();
    let samples = sample_col.str()?;

    let mut gene_cols = Vec::with_capacity(genes.len());
    for gene in &genes {
        gene_cols.push(df.column(gene)?.clone());
    }
    let gene_cells = gene_cols.iter().map(|c| c.str()).collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let sample = samples.get(i).unwrap_or_default().trim().to_string();
        let cells = gene_cells
            .iter()
            .map(|col| {
                col.get(i)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .collect();
        rows.push(WideRow { sample, cells });
    }

    debug!("Brief summary: {} samples x {} genes", rows.len(), genes.len());
    Ok(WideTable {
        path: path.to_path_buf(),
        genes,
        rows,
    })
}

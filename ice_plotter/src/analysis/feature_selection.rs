//! Pick the best-edited samples out of a wide brief-summary table.
//!
//! A sample scores one point for every gene whose ICE value reaches the
//! threshold; the `top_n` highest scorers are kept and the table is cut down
//! to them before plotting.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::data_handling::brief_summary::WideTable;
use crate::data_handling::labels::abbreviate;
use crate::error::{PlotError, PlotResult};
use crate::models::{AggregatedTable, Efficiency, GeneId, SampleId};

pub const DEFAULT_THRESHOLD: i64 = 90;
pub const DEFAULT_TOP_N: usize = 10;

fn gene_name(gene: &str, abbreviate_names: bool) -> GeneId {
    if abbreviate_names {
        abbreviate(gene)
    } else {
        gene.to_string()
    }
}

/// Returns `(gene_names, sample_ids)`.
///
/// Only samples with at least one gene at or above `threshold` are ranked.
/// Ties keep the order in which samples first reached the threshold. When
/// fewer than `top_n` samples qualify the list is simply shorter.
pub fn select_top_samples(
    table: &WideTable,
    threshold: i64,
    top_n: usize,
    abbreviate_names: bool,
) -> (Vec<GeneId>, Vec<SampleId>) {
    let gene_names = table
        .genes
        .iter()
        .map(|g| gene_name(g, abbreviate_names))
        .collect();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for row in &table.rows {
        for (_, cell) in row.iter_cells(&table.genes) {
            let Some(eff) = cell.and_then(|v| v.parse::<i64>().ok()) else {
                continue;
            };
            if eff < threshold {
                continue;
            }
            let pos = *position.entry(row.sample.as_str()).or_insert_with(|| {
                counts.push((row.sample.as_str(), 0));
                counts.len() - 1
            });
            counts[pos].1 += 1;
        }
    }

    // stable: equal counts keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let selected: Vec<SampleId> = counts
        .into_iter()
        .take(top_n)
        .map(|(sample, _)| sample.to_string())
        .collect();

    info!(
        "Selected {} samples with ICE >= {} (top {} requested)",
        selected.len(),
        threshold,
        top_n
    );
    (gene_names, selected)
}

/// Restrict the wide table to `selected` samples, keeping blanks as
/// [`Efficiency::Absent`] rather than zero.
pub fn filter_to_selected(
    table: &WideTable,
    selected: &[SampleId],
    abbreviate_names: bool,
) -> PlotResult<AggregatedTable> {
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut filtered = AggregatedTable::new();

    for row in table.rows.iter().filter(|r| wanted.contains(r.sample.as_str())) {
        let scores = filtered.scores_mut(&row.sample);
        for (gene, cell) in row.iter_cells(&table.genes) {
            let value = match cell {
                None => Efficiency::Absent,
                Some(raw) => raw.parse::<i64>().map(Efficiency::Present).map_err(|_| {
                    PlotError::MalformedScore {
                        path: table.path.clone(),
                        label: format!("{}/{}", row.sample, gene),
                        value: raw.to_string(),
                    }
                })?,
            };
            scores.insert(gene_name(gene, abbreviate_names), value);
        }
    }
    Ok(filtered)
}

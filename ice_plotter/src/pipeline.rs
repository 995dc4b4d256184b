use tracing::info;

use crate::analysis::feature_selection::{filter_to_selected, select_top_samples};
use crate::config::Config;
use crate::data_handling::aggregator::aggregate;
use crate::data_handling::brief_summary::BriefSummary;
use crate::data_handling::summary_loader::list_summary_paths;
use crate::error::PlotResult;
use crate::models::AggregatedTable;
use crate::plotting::encodings::build_encodings;
use crate::plotting::line_plot::{render, RenderOptions, RenderReport};

/// Load every gene summary under `config.root_dir`.
pub fn load_table(config: &Config) -> PlotResult<AggregatedTable> {
    let paths = list_summary_paths(&config.root_dir, &config.summary_filename)?;
    aggregate(&paths, config.abbreviate_names)
}

/// Run the whole job and write the plot.
pub fn run(config: &Config) -> PlotResult<RenderReport> {
    let mut table = load_table(config)?;

    if let Some(path) = &config.brief_summary {
        let brief = BriefSummary { path: path.clone() }.load()?;
        let (genes, samples) =
            select_top_samples(&brief, config.threshold, config.top_n, config.abbreviate_names);
        info!("Brief summary genes: {}", genes.join(", "));
        info!("Top samples: {}", samples.join(", "));
        table = filter_to_selected(&brief, &samples, config.abbreviate_names)?;
    }

    let encodings = build_encodings(config.use_extended_palette);
    render(
        &table,
        &encodings,
        &config.output_path,
        RenderOptions {
            overflow: config.overflow,
            ..RenderOptions::default()
        },
    )
}

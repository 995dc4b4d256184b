use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

mod analysis;
mod config;
mod data_handling;
mod error;
mod helper_functions;
mod models;
mod pipeline;
mod plotting;

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    info!("Starting the ICE efficiency plot for {}", config.root_dir.display());

    let report = match pipeline::run(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Err(e).with_context(|| format!("failed to plot {}", config.root_dir.display()));
        }
    };

    if !report.dropped.is_empty() {
        info!("Not plotted: {}", report.dropped.join(", "));
    }
    info!("Done: {} samples plotted", report.rendered.len());
    Ok(())
}

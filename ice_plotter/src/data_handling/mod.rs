pub mod labels;
pub mod summary_loader;
pub mod aggregator;
pub mod brief_summary;

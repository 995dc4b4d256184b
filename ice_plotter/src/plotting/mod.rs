pub mod markers;
pub mod encodings;
pub mod line_plot;

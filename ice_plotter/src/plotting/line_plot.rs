use std::collections::HashMap;
use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::{PlotError, PlotResult};
use crate::helper_functions::ensure_parent_dir;
use crate::models::{gene_categories, AggregatedTable, SampleId, SampleScores};
use crate::plotting::encodings::{assign_encodings, Encoding, OverflowPolicy};

pub const PLOT_SIZE: (u32, u32) = (1440, 720);
pub const X_DESC: &str = "Gene and Guide";
pub const Y_DESC: &str = "ICE value";

const MARKER_SIZE: i32 = 5;
const LEGEND_HALF_WIDTH: i32 = 12;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub overflow: OverflowPolicy,
    pub size: (u32, u32),
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Truncate,
            size: PLOT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<SampleId>,
    pub dropped: Vec<SampleId>,
}

/// Write `table` as an SVG line plot to `output_path`, replacing any existing
/// file. Nothing is written unless the whole chart was drawn.
pub fn render(
    table: &AggregatedTable,
    encodings: &[Encoding],
    output_path: &Path,
    options: RenderOptions,
) -> PlotResult<RenderReport> {
    let mut svg = String::new();
    let report = {
        let root = SVGBackend::with_string(&mut svg, options.size).into_drawing_area();
        let report = draw_line_plot(&root, table, encodings, options.overflow)?;
        root.present().map_err(PlotError::render)?;
        report
    };

    ensure_parent_dir(output_path)?;
    fs::write(output_path, svg).map_err(|e| PlotError::io(output_path, e))?;

    info!(
        "Plot with {} series saved to {}",
        report.rendered.len(),
        output_path.display()
    );
    Ok(report)
}

/// One line per sample over categorical gene positions. Usable with any
/// backend; [`render`] is the SVG file front-end.
pub fn draw_line_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &AggregatedTable,
    encodings: &[Encoding],
    overflow: OverflowPolicy,
) -> PlotResult<RenderReport> {
    let samples = table.sample_ids();
    let assignment = assign_encodings(&samples, encodings, overflow)?;
    if assignment.series.is_empty() {
        warn!("No samples to plot, writing an empty chart");
    }

    let series: Vec<(&str, &SampleScores, Encoding)> = assignment
        .series
        .iter()
        .filter_map(|&(sample, enc)| table.sample(sample).map(|scores| (sample, scores, enc)))
        .collect();

    let genes = gene_categories(series.iter().map(|(_, scores, _)| *scores));
    let gene_pos: HashMap<&str, i32> = genes
        .iter()
        .enumerate()
        .map(|(i, g)| (*g, i as i32))
        .collect();
    let (y_min, y_max) = y_range(series.iter().map(|(_, scores, _)| *scores));

    root.fill(&WHITE).map_err(PlotError::render)?;

    let categories = genes.len().max(1) as i32;
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d((0..categories).into_segmented(), y_min..y_max)
        .map_err(PlotError::render)?;

    let gene_label = |x: &SegmentValue<i32>| match x {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| genes.get(i))
            .map(|g| g.to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(genes.len().max(1))
        .x_label_formatter(&gene_label)
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(PlotError::render)?;

    for &(sample, scores, encoding) in &series {
        let colour = encoding.color.rgb_color();
        let Some(glyph) = encoding.marker.glyph(MARKER_SIZE) else {
            continue;
        };

        let runs = present_runs(scores, &gene_pos);
        for run in runs.iter().filter(|run| run.len() > 1) {
            chart
                .draw_series(LineSeries::new(run.iter().cloned(), colour.stroke_width(2)))
                .map_err(PlotError::render)?;
        }

        let fill = if glyph.filled {
            colour.filled()
        } else {
            TRANSPARENT.filled()
        };
        let outline = glyph.outline();
        let mut legend_path = vec![(-LEGEND_HALF_WIDTH, 0), (LEGEND_HALF_WIDTH, 0), (0, 0)];
        legend_path.extend(outline.iter().copied());

        chart
            .draw_series(runs.into_iter().flatten().map(|p| {
                EmptyElement::at(p)
                    + Polygon::new(glyph.points.clone(), fill)
                    + PathElement::new(outline.clone(), colour.stroke_width(1))
            }))
            .map_err(PlotError::render)?
            .label(sample)
            .legend(move |(x, y)| {
                PathElement::new(
                    legend_path
                        .iter()
                        .map(|&(dx, dy)| (x + LEGEND_HALF_WIDTH + dx, y + dy))
                        .collect::<Vec<_>>(),
                    colour.stroke_width(2),
                )
            });
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 14))
            .legend_area_size(2 * LEGEND_HALF_WIDTH + 6)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(PlotError::render)?;
    }

    Ok(RenderReport {
        rendered: series.iter().map(|(s, _, _)| s.to_string()).collect(),
        dropped: assignment.dropped.iter().map(|s| s.to_string()).collect(),
    })
}

/// Consecutive present scores of one sample; an absent value breaks the line.
fn present_runs(
    scores: &SampleScores,
    gene_pos: &HashMap<&str, i32>,
) -> Vec<Vec<(SegmentValue<i32>, f64)>> {
    let mut runs = vec![Vec::new()];
    for (gene, eff) in scores.iter() {
        match (eff.value(), gene_pos.get(gene)) {
            (Some(v), Some(&x)) => {
                if let Some(run) = runs.last_mut() {
                    run.push((SegmentValue::CenterOf(x), v as f64));
                }
            }
            _ => {
                if runs.last().map_or(false, |run| !run.is_empty()) {
                    runs.push(Vec::new());
                }
            }
        }
    }
    runs.retain(|run| !run.is_empty());
    runs
}

/// ICE is a percentage, so always show 0..100 and widen only for outliers.
fn y_range<'a>(series: impl Iterator<Item = &'a SampleScores>) -> (f64, f64) {
    let (lo, hi) = series
        .flat_map(|scores| scores.iter().filter_map(|(_, eff)| eff.value()))
        .fold((0, 100), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo as f64 - 2.0, hi as f64 + 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Efficiency;
    use crate::plotting::encodings::{build_encodings, BASE_COLORS};
    use crate::plotting::markers::{Dir, MarkerShape};
    use tempfile::tempdir;

    fn draw_to_string(table: &AggregatedTable, encodings: &[Encoding]) -> (String, RenderReport) {
        let mut svg = String::new();
        let report = {
            let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
            let report = draw_line_plot(&root, table, encodings, OverflowPolicy::Truncate).unwrap();
            root.present().unwrap();
            report
        };
        (svg, report)
    }

    #[test]
    fn one_legend_entry_per_sample() {
        let mut table = AggregatedTable::new();
        table.insert("sampleA", "gene1".into(), Efficiency::Present(85));
        table.insert("sampleA", "gene2".into(), Efficiency::Present(40));
        table.insert("sampleB", "gene1".into(), Efficiency::Present(12));

        let (svg, report) = draw_to_string(&table, &build_encodings(false));
        assert_eq!(report.rendered, vec!["sampleA", "sampleB"]);
        assert!(report.dropped.is_empty());
        assert_eq!(svg.matches("sampleA").count(), 1);
        assert_eq!(svg.matches("sampleB").count(), 1);
        assert!(svg.contains(X_DESC));
        assert!(svg.contains(Y_DESC));
    }

    #[test]
    fn samples_beyond_budget_are_left_out_of_legend() {
        let mut table = AggregatedTable::new();
        for sample in ["s-one", "s-two", "s-three"] {
            table.insert(sample, "g".into(), Efficiency::Present(50));
        }
        let encodings = build_encodings(false);

        let (svg, report) = draw_to_string(&table, &encodings[..2]);
        assert_eq!(report.rendered, vec!["s-one", "s-two"]);
        assert_eq!(report.dropped, vec!["s-three"]);
        assert!(!svg.contains("s-three"));
    }

    #[test]
    fn absent_values_split_lines() {
        let mut scores = SampleScores::default();
        scores.insert("a".into(), Efficiency::Present(1));
        scores.insert("b".into(), Efficiency::Absent);
        scores.insert("c".into(), Efficiency::Present(3));
        scores.insert("d".into(), Efficiency::Present(4));
        let pos: HashMap<&str, i32> = [("a", 0), ("b", 1), ("c", 2), ("d", 3)].into_iter().collect();

        let runs = present_runs(&scores, &pos);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 1);
        assert_eq!(runs[1].len(), 2);
    }

    #[test]
    fn y_axis_covers_percentages_and_outliers() {
        let mut scores = SampleScores::default();
        scores.insert("a".into(), Efficiency::Present(120));
        assert_eq!(y_range(std::iter::once(&scores)), (-2.0, 125.0));
        assert_eq!(y_range(std::iter::empty()), (-2.0, 105.0));
    }

    #[test]
    fn empty_table_still_writes_svg() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("plot.svg");

        let report = render(
            &AggregatedTable::new(),
            &build_encodings(false),
            &out,
            RenderOptions::default(),
        )
        .unwrap();
        assert!(report.rendered.is_empty());
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn filled_open_and_round_markers_share_one_chart() {
        let mut table = AggregatedTable::new();
        for (i, sample) in ["sampleDot", "sampleSquare", "sampleTri"].into_iter().enumerate() {
            table.insert(sample, "g1".into(), Efficiency::Present(10 * i as i64));
            table.insert(sample, "g2".into(), Efficiency::Present(50));
        }
        let encodings: Vec<Encoding> = [MarkerShape::Point, MarkerShape::Square, MarkerShape::Tri(Dir::Up)]
            .into_iter()
            .zip(BASE_COLORS)
            .map(|(marker, color)| Encoding { marker, color })
            .collect();

        let (svg, report) = draw_to_string(&table, &encodings);
        assert_eq!(report.rendered, vec!["sampleDot", "sampleSquare", "sampleTri"]);
        assert!(svg.contains("<polygon"));
        for sample in ["sampleDot", "sampleSquare", "sampleTri"] {
            assert_eq!(svg.matches(sample).count(), 1, "{sample}");
        }
    }

    #[test]
    fn failed_render_leaves_existing_plot_untouched() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("plot.svg");
        std::fs::write(&out, "previous plot").unwrap();

        let mut table = AggregatedTable::new();
        for sample in ["s1", "s2", "s3"] {
            table.insert(sample, "g".into(), Efficiency::Present(50));
        }
        let encodings = build_encodings(false);
        let options = RenderOptions {
            overflow: OverflowPolicy::Fail,
            ..RenderOptions::default()
        };

        let result = render(&table, &encodings[..2], &out, options);
        assert!(matches!(
            result,
            Err(PlotError::EncodingOverflow { requested: 3, available: 2 })
        ));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous plot");

        let fresh = dir.path().join("fresh.svg");
        assert!(render(&table, &encodings[..2], &fresh, options).is_err());
        assert!(!fresh.exists());
    }
}

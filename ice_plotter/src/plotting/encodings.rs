use std::fmt;

use clap::ValueEnum;
use plotters::style::RGBColor;
use tracing::{debug, warn};

use crate::error::{PlotError, PlotResult};
use crate::plotting::markers::MarkerShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor {
    pub code: &'static str,
    pub rgb: (u8, u8, u8),
}

impl PaletteColor {
    const fn new(code: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { code, rgb }
    }

    pub fn rgb_color(self) -> RGBColor {
        RGBColor(self.rgb.0, self.rgb.1, self.rgb.2)
    }

    /// White disappears on the white chart background.
    pub fn is_blank(self) -> bool {
        self.code == "w"
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

pub const BASE_COLORS: [PaletteColor; 8] = [
    PaletteColor::new("b", (0, 0, 255)),
    PaletteColor::new("g", (0, 128, 0)),
    PaletteColor::new("r", (255, 0, 0)),
    PaletteColor::new("c", (0, 191, 191)),
    PaletteColor::new("m", (191, 0, 191)),
    PaletteColor::new("y", (191, 191, 0)),
    PaletteColor::new("k", (0, 0, 0)),
    PaletteColor::new("w", (255, 255, 255)),
];

pub const EXTENDED_COLORS: [PaletteColor; 10] = [
    PaletteColor::new("#006666", (0x00, 0x66, 0x66)),
    PaletteColor::new("#ff1a66", (0xff, 0x1a, 0x66)),
    PaletteColor::new("#66ff33", (0x66, 0xff, 0x33)),
    PaletteColor::new("#ff33ff", (0xff, 0x33, 0xff)),
    PaletteColor::new("#996600", (0x99, 0x66, 0x00)),
    PaletteColor::new("#00ffff", (0x00, 0xff, 0xff)),
    PaletteColor::new("#76a2a2", (0x76, 0xa2, 0xa2)),
    PaletteColor::new("#ffff1a", (0xff, 0xff, 0x1a)),
    PaletteColor::new("#ff8000", (0xff, 0x80, 0x00)),
    PaletteColor::new("#999966", (0x99, 0x99, 0x66)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding {
    pub marker: MarkerShape,
    pub color: PaletteColor,
}

/// What to do when there are more samples than encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OverflowPolicy {
    /// Plot the first samples that fit and warn about the rest.
    #[default]
    Truncate,
    /// Refuse to plot.
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<'a> {
    pub series: Vec<(&'a str, Encoding)>,
    pub dropped: Vec<&'a str>,
}

/// All (marker, colour) pairs, marker-major, skipping the empty marker and
/// white.
pub fn build_encodings(use_extended_palette: bool) -> Vec<Encoding> {
    let colors: &[PaletteColor] = if use_extended_palette {
        &EXTENDED_COLORS
    } else {
        &BASE_COLORS
    };

    let mut encodings = Vec::new();
    for marker in MarkerShape::catalog() {
        if marker.is_nothing() {
            continue;
        }
        for &color in colors {
            if color.is_blank() {
                continue;
            }
            encodings.push(Encoding { marker, color });
        }
    }
    debug!("{} marker/colour combinations available", encodings.len());
    encodings
}

/// Pair the i-th sample with the i-th encoding. Encodings are never reused.
pub fn assign_encodings<'a>(
    samples: &[&'a str],
    encodings: &[Encoding],
    policy: OverflowPolicy,
) -> PlotResult<Assignment<'a>> {
    let available = encodings.len();
    if samples.len() > available {
        match policy {
            OverflowPolicy::Fail => {
                return Err(PlotError::EncodingOverflow {
                    requested: samples.len(),
                    available,
                })
            }
            OverflowPolicy::Truncate => warn!(
                "{} samples but only {} marker/colour combinations: dropping {} samples from the plot",
                samples.len(),
                available,
                samples.len() - available
            ),
        }
    }

    let split = samples.len().min(available);
    let series = samples[..split]
        .iter()
        .zip(encodings.iter())
        .map(|(&sample, &encoding)| (sample, encoding))
        .collect();
    Ok(Assignment {
        series,
        dropped: samples[split..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawable_markers() -> usize {
        MarkerShape::catalog().iter().filter(|m| !m.is_nothing()).count()
    }

    #[test]
    fn base_palette_skips_white() {
        let encodings = build_encodings(false);
        assert_eq!(encodings.len(), drawable_markers() * 7);
        assert!(encodings.iter().all(|e| e.color.code != "w"));
        assert!(encodings.iter().all(|e| !e.marker.is_nothing()));
    }

    #[test]
    fn extended_palette_uses_all_ten_colours() {
        let encodings = build_encodings(true);
        assert_eq!(encodings.len(), drawable_markers() * 10);
        assert_eq!(encodings[0].color.code, "#006666");
        assert_eq!(encodings[9].color.code, "#999966");
        assert_eq!(encodings[10].marker, MarkerShape::Pixel);
    }

    #[test]
    fn order_is_marker_major_and_stable() {
        let first = build_encodings(false);
        assert_eq!(first, build_encodings(false));
        assert_eq!(first[0], Encoding { marker: MarkerShape::Point, color: BASE_COLORS[0] });
        assert_eq!(first[6].color.code, "k");
        assert_eq!(first[7], Encoding { marker: MarkerShape::Pixel, color: BASE_COLORS[0] });
    }

    #[test]
    fn truncation_reports_dropped_samples() {
        let encodings = &build_encodings(false)[..2];
        let assignment =
            assign_encodings(&["a", "b", "c"], encodings, OverflowPolicy::Truncate).unwrap();
        assert_eq!(assignment.series.len(), 2);
        assert_eq!(assignment.series[1], ("b", encodings[1]));
        assert_eq!(assignment.dropped, vec!["c"]);
    }

    #[test]
    fn strict_policy_names_overflow() {
        let encodings = &build_encodings(false)[..2];
        let err = assign_encodings(&["a", "b", "c", "d"], encodings, OverflowPolicy::Fail).unwrap_err();
        match &err {
            PlotError::EncodingOverflow { requested, available } => {
                assert_eq!((*requested, *available), (4, 2));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("2 over budget"));
    }

    #[test]
    fn within_budget_nothing_is_dropped() {
        let encodings = build_encodings(true);
        let assignment = assign_encodings(&["a"], &encodings, OverflowPolicy::Fail).unwrap();
        assert!(assignment.dropped.is_empty());
        assert_eq!(assignment.series, vec![("a", encodings[0])]);
    }
}

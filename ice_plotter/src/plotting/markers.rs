//! Marker glyph catalog.
//!
//! The catalog follows the conventional plotting marker table (point, pixel,
//! circle, triangles, tri-stars, polygons, ticks, carets) including its
//! "nothing" placeholder, which is kept so that callers can filter it out
//! explicitly. Every other shape maps to a pixel-space [`Glyph`] centred on
//! `(0, 0)` with `y` growing downwards, as the drawing backends expect.

use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Turn a shape drawn pointing up so that it points this way.
    fn turn(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Dir::Up => (x, y),
            Dir::Right => (-y, x),
            Dir::Down => (-x, -y),
            Dir::Left => (y, -x),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Point,
    Pixel,
    Circle,
    Triangle(Dir),
    Tri(Dir),
    Octagon,
    Square,
    Pentagon,
    Star,
    Hexagon1,
    Hexagon2,
    Plus,
    X,
    Diamond,
    ThinDiamond,
    VLine,
    HLine,
    PlusFilled,
    XFilled,
    Tick(Dir),
    Caret(Dir),
    CaretBase(Dir),
    Nothing,
}

/// Pixel geometry of one marker. Filled glyphs are closed polygons; open ones
/// are a single polyline, disjoint strokes joined by retracing the centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub points: Vec<(i32, i32)>,
    pub filled: bool,
}

impl Glyph {
    fn filled(points: Vec<(i32, i32)>) -> Self {
        Self { points, filled: true }
    }

    fn stroked(points: Vec<(i32, i32)>) -> Self {
        Self { points, filled: false }
    }

    /// Path tracing the glyph; closed for filled glyphs.
    pub fn outline(&self) -> Vec<(i32, i32)> {
        let mut path = self.points.clone();
        if self.filled {
            if let Some(&first) = self.points.first() {
                path.push(first);
            }
        }
        path
    }
}

use Dir::{Down, Left, Right, Up};

impl MarkerShape {
    /// Every shape in table order, ending with the `Nothing` placeholder.
    pub fn catalog() -> Vec<MarkerShape> {
        use MarkerShape::*;
        let mut shapes = vec![Point, Pixel, Circle];
        shapes.extend([Down, Up, Left, Right].map(Triangle));
        shapes.extend([Down, Up, Left, Right].map(Tri));
        shapes.extend([
            Octagon, Square, Pentagon, Star, Hexagon1, Hexagon2, Plus, X, Diamond, ThinDiamond,
            VLine, HLine, PlusFilled, XFilled,
        ]);
        for family in [Tick, Caret, CaretBase] {
            shapes.extend([Left, Right, Up, Down].map(family));
        }
        shapes.push(Nothing);
        shapes
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MarkerShape::Point => ".",
            MarkerShape::Pixel => ",",
            MarkerShape::Circle => "o",
            MarkerShape::Triangle(d) => ["^", "v", "<", ">"][d as usize],
            MarkerShape::Tri(d) => ["2", "1", "3", "4"][d as usize],
            MarkerShape::Octagon => "8",
            MarkerShape::Square => "s",
            MarkerShape::Pentagon => "p",
            MarkerShape::Star => "*",
            MarkerShape::Hexagon1 => "h",
            MarkerShape::Hexagon2 => "H",
            MarkerShape::Plus => "+",
            MarkerShape::X => "x",
            MarkerShape::Diamond => "D",
            MarkerShape::ThinDiamond => "d",
            MarkerShape::VLine => "|",
            MarkerShape::HLine => "_",
            MarkerShape::PlusFilled => "P",
            MarkerShape::XFilled => "X",
            MarkerShape::Tick(d) => ["tickup", "tickdown", "tickleft", "tickright"][d as usize],
            MarkerShape::Caret(d) => ["caretup", "caretdown", "caretleft", "caretright"][d as usize],
            MarkerShape::CaretBase(d) => {
                ["caretupbase", "caretdownbase", "caretleftbase", "caretrightbase"][d as usize]
            }
            MarkerShape::Nothing => "None",
        }
    }

    pub fn is_nothing(self) -> bool {
        self == MarkerShape::Nothing
    }

    /// Geometry at marker size `s` (half-width in pixels). `None` for the
    /// placeholder shape.
    pub fn glyph(self, s: i32) -> Option<Glyph> {
        let h = s / 2;
        let pointing = |d: Dir, template: &[(i32, i32)]| -> Vec<(i32, i32)> {
            template.iter().map(|&p| d.turn(p)).collect()
        };
        let glyph = match self {
            MarkerShape::Point => Glyph::filled(regular_polygon(12, h.max(1), 0.0)),
            MarkerShape::Pixel => Glyph::filled(vec![(-1, -1), (1, -1), (1, 1), (-1, 1)]),
            MarkerShape::Circle => Glyph::filled(regular_polygon(16, s, 0.0)),
            MarkerShape::Triangle(d) => Glyph::filled(pointing(d, &[(0, -s), (s, s), (-s, s)])),
            MarkerShape::Tri(d) => {
                let spokes: Vec<_> = (0..3)
                    .flat_map(|k| [(0, 0), polar(s as f64, -PI / 2.0 + 2.0 * PI * k as f64 / 3.0)])
                    .collect();
                Glyph::stroked(pointing(d, &spokes))
            }
            MarkerShape::Octagon => Glyph::filled(regular_polygon(8, s, PI / 8.0)),
            MarkerShape::Square => Glyph::filled(vec![(-s, -s), (s, -s), (s, s), (-s, s)]),
            MarkerShape::Pentagon => Glyph::filled(regular_polygon(5, s, -PI / 2.0)),
            MarkerShape::Star => Glyph::filled(star(5, s, s * 2 / 5)),
            MarkerShape::Hexagon1 => Glyph::filled(regular_polygon(6, s, -PI / 2.0)),
            MarkerShape::Hexagon2 => Glyph::filled(regular_polygon(6, s, 0.0)),
            MarkerShape::Plus => Glyph::stroked(vec![(-s, 0), (s, 0), (0, 0), (0, -s), (0, s)]),
            MarkerShape::X => Glyph::stroked(vec![(-s, -s), (s, s), (0, 0), (s, -s), (-s, s)]),
            MarkerShape::Diamond => Glyph::filled(vec![(0, -s), (s, 0), (0, s), (-s, 0)]),
            MarkerShape::ThinDiamond => Glyph::filled(vec![(0, -s), (h, 0), (0, s), (-h, 0)]),
            MarkerShape::VLine => Glyph::stroked(vec![(0, -s), (0, s)]),
            MarkerShape::HLine => Glyph::stroked(vec![(-s, 0), (s, 0)]),
            MarkerShape::PlusFilled => Glyph::filled(plus_polygon(s, h / 2 + 1)),
            MarkerShape::XFilled => Glyph::filled(rotate(&plus_polygon(s, h / 2 + 1), PI / 4.0)),
            MarkerShape::Tick(d) => Glyph::stroked(pointing(d, &[(0, 0), (0, -s)])),
            MarkerShape::Caret(d) => Glyph::filled(pointing(d, &[(0, -s), (s, 0), (-s, 0)])),
            MarkerShape::CaretBase(d) => Glyph::filled(pointing(d, &[(0, 0), (s, s), (-s, s)])),
            MarkerShape::Nothing => return None,
        };
        Some(glyph)
    }
}

impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn polar(r: f64, angle: f64) -> (i32, i32) {
    ((r * angle.cos()).round() as i32, (r * angle.sin()).round() as i32)
}

fn regular_polygon(sides: usize, r: i32, start: f64) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| polar(r as f64, start + 2.0 * PI * i as f64 / sides as f64))
        .collect()
}

fn star(points: usize, outer: i32, inner: i32) -> Vec<(i32, i32)> {
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            polar(r as f64, -PI / 2.0 + PI * i as f64 / points as f64)
        })
        .collect()
}

fn plus_polygon(s: i32, w: i32) -> Vec<(i32, i32)> {
    let quarter = [(-w, -s), (w, -s), (w, -w)];
    [Up, Right, Down, Left]
        .iter()
        .flat_map(|d| quarter.iter().map(move |&p| d.turn(p)))
        .collect()
}

fn rotate(points: &[(i32, i32)], angle: f64) -> Vec<(i32, i32)> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|&(x, y)| {
            let (x, y) = (x as f64, y as f64);
            ((x * cos - y * sin).round() as i32, (x * sin + y * cos).round() as i32)
        })
        .collect()
}

//! Static vertex placement for rendering.
//!
//! Layouts assign each vertex id a point in layout units, where one unit
//! is the spacing between neighbouring grid cells. Vertex sizes are
//! expressed in the same units.

use std::f64::consts::TAU;

/// Available layout algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Row-major grid, `ceil(sqrt(n))` columns wide
    #[default]
    Grid,
    /// Evenly spaced on a circle
    Circle,
}

impl std::str::FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(LayoutKind::Grid),
            "circle" | "circular" => Ok(LayoutKind::Circle),
            _ => Err(format!(
                "Unknown layout: '{}'. Valid layouts: grid, circle",
                s
            )),
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutKind::Grid => write!(f, "grid"),
            LayoutKind::Circle => write!(f, "circle"),
        }
    }
}

/// A position in layout units. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Vertex positions indexed by vertex id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    positions: Vec<Point>,
}

impl Layout {
    /// Computes a layout of the given kind for `n` vertices.
    pub fn compute(kind: LayoutKind, n: usize) -> Self {
        match kind {
            LayoutKind::Grid => Self::grid(n),
            LayoutKind::Circle => Self::circle(n),
        }
    }

    /// Places vertices row by row on a square-ish grid.
    ///
    /// # Example
    ///
    /// ```
    /// use coursegraph::layout::{Layout, Point};
    ///
    /// let layout = Layout::grid(5);
    /// assert_eq!(layout.position(2), Some(Point::new(2.0, 0.0)));
    /// assert_eq!(layout.position(4), Some(Point::new(1.0, 1.0)));
    /// ```
    pub fn grid(n: usize) -> Self {
        let width = grid_width(n);
        let positions = (0..n)
            .map(|i| Point::new((i % width) as f64, (i / width) as f64))
            .collect();
        Self { positions }
    }

    /// Places vertices counter-clockwise on a circle, starting at angle zero.
    ///
    /// The radius grows with `n` so neighbours stay about one unit apart.
    pub fn circle(n: usize) -> Self {
        let radius = (n as f64 / TAU).max(1.0);
        let positions = (0..n)
            .map(|i| {
                let angle = TAU * i as f64 / n as f64;
                Point::new(radius * angle.cos(), -radius * angle.sin())
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: usize) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the bounding box, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.positions.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.positions.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

fn grid_width(n: usize) -> usize {
    let mut width = (n as f64).sqrt().ceil() as usize;
    // float rounding guard for large perfect squares
    while width * width < n {
        width += 1;
    }
    width.max(1)
}

//! SVG rendering of a laid-out course graph.
//!
//! Produces a static image: white vertices scaled by display size, course
//! name labels, and arrowed edges from prerequisite to dependent course.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::graph::CourseGraph;
use crate::layout::{Layout, Point};

/// SVG renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    /// Pixels per layout unit
    pub unit: f64,
    /// Blank border around the drawing, in pixels
    pub margin: f64,
    /// Label font size, in pixels
    pub label_size: f64,
    /// Edge stroke width, in pixels
    pub edge_width: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            unit: 120.0,
            margin: 80.0,
            label_size: 10.0,
            edge_width: 0.7,
        }
    }
}

impl SvgRenderer {
    /// Escape text for XML content and attribute values.
    fn escape_xml(value: &str) -> String {
        value
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    /// Renders `graph` placed by `layout` as an SVG document.
    ///
    /// Vertices without a position in `layout` are skipped, as are edges
    /// touching them.
    pub fn render<W: Write>(&self, graph: &CourseGraph, layout: &Layout, writer: &mut W) -> io::Result<()> {
        let (origin, width, height) = match layout.bounds() {
            Some(b) => (
                Point::new(b.min_x, b.min_y),
                b.width() * self.unit + 2.0 * self.margin,
                b.height() * self.unit + 2.0 * self.margin,
            ),
            None => (Point::default(), 2.0 * self.margin, 2.0 * self.margin),
        };
        let to_px = |p: Point| {
            Point::new(
                self.margin + (p.x - origin.x) * self.unit,
                self.margin + (p.y - origin.y) * self.unit,
            )
        };
        let radius = |size: f64| size / 2.0 * self.unit;

        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
            w = width,
            h = height
        )?;
        writeln!(writer, "  <title>{}</title>", Self::escape_xml(graph.title()))?;
        writeln!(writer, "  <defs>")?;
        writeln!(
            writer,
            r#"    <marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">"#
        )?;
        writeln!(writer, r#"      <path d="M 0 0 L 10 5 L 0 10 z" fill="black"/>"#)?;
        writeln!(writer, "    </marker>")?;
        writeln!(writer, "  </defs>")?;
        writeln!(writer, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        writeln!(
            writer,
            r#"  <g stroke="black" stroke-width="{}" fill="none">"#,
            self.edge_width
        )?;
        for (from, to) in graph.edges() {
            let (Some(a), Some(b), Some(target)) = (layout.position(from), layout.position(to), graph.node(to))
            else {
                continue;
            };
            let (a, b) = (to_px(a), to_px(b));
            let r = radius(target.size);

            if from == to {
                writeln!(
                    writer,
                    r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}"/>"#,
                    b.x + r,
                    b.y - r,
                    r * 0.6
                )?;
                continue;
            }

            // stop at the target's rim so the arrowhead stays visible
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let length = (dx * dx + dy * dy).sqrt();
            let shrink = if length > r { r / length } else { 0.0 };
            writeln!(
                writer,
                r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" marker-end="url(#arrow)"/>"#,
                a.x,
                a.y,
                b.x - dx * shrink,
                b.y - dy * shrink
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(writer, r#"  <g stroke="black" stroke-width="1" fill="white">"#)?;
        for node in graph.nodes() {
            let Some(p) = layout.position(node.id) else {
                continue;
            };
            let p = to_px(p);
            writeln!(
                writer,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}"/>"#,
                p.x,
                p.y,
                radius(node.size)
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(
            writer,
            r#"  <g font-family="sans-serif" font-size="{}" text-anchor="middle" dominant-baseline="central">"#,
            self.label_size
        )?;
        for node in graph.nodes() {
            let Some(p) = layout.position(node.id) else {
                continue;
            };
            let p = to_px(p);
            writeln!(
                writer,
                r#"    <text x="{:.2}" y="{:.2}">{}</text>"#,
                p.x,
                p.y,
                Self::escape_xml(&node.name)
            )?;
        }
        writeln!(writer, "  </g>")?;

        writeln!(writer, "</svg>")
    }

    /// Renders to a file, replacing any existing file.
    pub fn render_to_file(&self, graph: &CourseGraph, layout: &Layout, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.render(graph, layout, &mut writer)?;
        writer.flush()
    }
}

//! The batch pipeline: CSV in, graph file (and optional image) out.
//!
//! Stages run strictly in order: load, resolve names, decode dependency
//! lists, expand edges, assemble the graph, lay it out, export, render.
//! Any failure aborts the run before the output file is opened, so a
//! partial graph is never written.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{DisplayMode, PipelineConfig};
use crate::export::gml::{self, GmlError};
use crate::export::export_to_file;
use crate::graph::{CourseGraph, GraphError, SizeRange};
use crate::layout::Layout;
use crate::parser::{parse_file, LoadError};
use crate::render::SvgRenderer;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The course CSV could not be read or parsed.
    #[error("Failed to load '{}': {}", .path.display(), .source)]
    Load {
        /// Input path
        path: PathBuf,
        /// Underlying loader error
        source: LoadError,
    },

    /// Name resolution or graph assembly failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The graph file could not be written.
    #[error("Failed to write graph to '{}': {}", .path.display(), .source)]
    Export {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The image could not be written.
    #[error("Failed to render image to '{}': {}", .path.display(), .source)]
    Render {
        /// Image path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A GML file could not be read back.
    #[error("Failed to import '{}': {}", .path.display(), .source)]
    Import {
        /// GML path
        path: PathBuf,
        /// Underlying GML error
        source: GmlError,
    },
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The assembled graph
    pub graph: CourseGraph,
    /// Vertex positions used for rendering
    pub layout: Layout,
    /// Display mode after resolving `auto`
    pub display: DisplayMode,
}

/// Loads the course CSV and assembles the graph.
pub fn load_graph(config: &PipelineConfig) -> PipelineResult<CourseGraph> {
    let table = parse_file(&config.input).map_err(|source| PipelineError::Load {
        path: config.input.clone(),
        source,
    })?;
    info!(path = %config.input.display(), rows = table.len(), "loaded course table");

    Ok(CourseGraph::build(&table, &config.graph)?)
}

/// Runs the whole batch transformation.
///
/// `interactive` tells whether stdout is a terminal; it only matters for
/// [`DisplayMode::Auto`]. The terminal viewer itself is left to the caller.
pub fn run(config: &PipelineConfig, interactive: bool) -> PipelineResult<PipelineOutput> {
    let graph = load_graph(config)?;
    let layout = Layout::compute(config.layout, graph.node_count());

    let format = config.export_format();
    export_to_file(format, &graph, &config.output).map_err(|source| PipelineError::Export {
        path: config.output.clone(),
        source,
    })?;
    info!(path = %config.output.display(), %format, "wrote course graph");

    let display = config.display.resolve(interactive);
    if display == DisplayMode::Svg {
        SvgRenderer::default()
            .render_to_file(&graph, &layout, &config.image)
            .map_err(|source| PipelineError::Render {
                path: config.image.clone(),
                source,
            })?;
        info!(path = %config.image.display(), layout = %config.layout, "rendered graph image");
    }

    Ok(PipelineOutput {
        graph,
        layout,
        display,
    })
}

/// Reads a GML file back into a course graph.
pub fn inspect(path: &Path) -> PipelineResult<CourseGraph> {
    let document = gml::parse_file(path).map_err(|source| PipelineError::Import {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(CourseGraph::from_gml(&document, SizeRange::default())?)
}

/// Formats a human-readable listing of a graph.
///
/// # Example
///
/// ```
/// use coursegraph::graph::{CourseGraph, SizeRange};
/// use coursegraph::pipeline::describe;
///
/// let graph = CourseGraph::from_parts(
///     "Courses",
///     vec!["Intro".to_string(), "Advanced".to_string()],
///     &[(0, 1)],
///     SizeRange::default(),
/// )
/// .unwrap();
///
/// let text = describe(&graph);
/// assert!(text.contains("2 courses, 1 prerequisite links"));
/// assert!(text.contains("[1] Advanced <- Intro"));
/// ```
pub fn describe(graph: &CourseGraph) -> String {
    let mut lines = vec![
        graph.title().to_string(),
        format!(
            "{} courses, {} prerequisite links",
            graph.node_count(),
            graph.edge_count()
        ),
    ];

    for node in graph.nodes() {
        let prereqs: Vec<&str> = graph
            .prerequisites_of(node.id)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        if prereqs.is_empty() {
            lines.push(format!("  [{}] {}", node.id, node.name));
        } else {
            lines.push(format!("  [{}] {} <- {}", node.id, node.name, prereqs.join(", ")));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

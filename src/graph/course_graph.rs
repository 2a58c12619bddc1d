//! Course prerequisite graph built on petgraph.
//!
//! Vertices are courses in source row order (vertex id == row position),
//! edges point from a prerequisite to the course that requires it.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, info, warn};

use super::course_index::{CourseIndex, DuplicatePolicy};
use super::dependencies::{Dependencies, WhitespacePolicy};
use super::error::{GraphError, GraphResult};
use super::sizing::SizeRange;
use crate::export::gml::GmlGraph;
use crate::parser::CourseTable;

/// Title given to graphs when none is configured.
pub const DEFAULT_TITLE: &str = "UMich Course Dependencies";

/// Options controlling how a [`CourseTable`] becomes a [`CourseGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Graph-level title attribute
    pub title: String,
    /// Treatment of repeated course names
    pub duplicates: DuplicatePolicy,
    /// Treatment of whitespace around dependency names
    pub whitespace: WhitespacePolicy,
    /// Display size interval for vertices
    pub size_range: SizeRange,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            duplicates: DuplicatePolicy::default(),
            whitespace: WhitespacePolicy::default(),
            size_range: SizeRange::default(),
        }
    }
}

/// A vertex of the course graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseNode {
    /// Vertex id, equal to the source row position
    pub id: usize,
    /// Course name, used as the vertex label
    pub name: String,
    /// Number of listed prerequisites, duplicates included
    pub dependency_count: usize,
    /// Rendering size derived from `dependency_count`
    pub size: f64,
}

/// Expands decoded dependency lists into directed edges.
///
/// Row `i` with prerequisites `deps` contributes one edge `(d, i)` per
/// entry of `deps`, in row order. Duplicates are kept.
///
/// # Example
///
/// ```
/// use coursegraph::graph::{expand_edges, Dependencies};
///
/// let decoded = vec![Dependencies::None, Dependencies::List(vec![0, 0])];
/// assert_eq!(expand_edges(&decoded), vec![(0, 1), (0, 1)]);
/// ```
pub fn expand_edges(decoded: &[Dependencies]) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for (course, deps) in decoded.iter().enumerate() {
        if let Dependencies::List(ids) = deps {
            debug!(course, prerequisites = ?ids, "expanding prerequisites");
            edges.extend(ids.iter().map(|&d| (d, course)));
        }
    }
    edges
}

/// A directed graph of course prerequisites.
///
/// # Example
///
/// ```rust
/// use coursegraph::graph::{CourseGraph, GraphOptions};
/// use coursegraph::parser::{CourseRow, CourseTable};
///
/// let table = CourseTable::from_rows(vec![
///     CourseRow::new("Intro", ""),
///     CourseRow::new("Advanced", "Intro"),
/// ]);
/// let graph = CourseGraph::build(&table, &GraphOptions::default()).unwrap();
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edges(), vec![(0, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct CourseGraph {
    /// The underlying directed graph
    graph: DiGraph<CourseNode, ()>,
    /// Graph-level title
    title: String,
}

impl CourseGraph {
    /// Builds the graph from a loaded course table.
    ///
    /// Runs name resolution, dependency decoding, edge expansion and size
    /// normalization. Any unknown dependency aborts the whole build.
    pub fn build(table: &CourseTable, options: &GraphOptions) -> GraphResult<Self> {
        let index = CourseIndex::build(table, options.duplicates)?;

        let decoded = table
            .iter()
            .map(|row| Dependencies::decode(&row.name, &row.dependencies, &index, options.whitespace))
            .collect::<GraphResult<Vec<_>>>()?;

        let edges = expand_edges(&decoded);
        let counts: Vec<usize> = decoded.iter().map(Dependencies::len).collect();
        let names = table.iter().map(|row| row.name.clone()).collect();

        let graph = Self::assemble(&options.title, names, &counts, &edges, options.size_range)?;
        info!(
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            "assembled course graph"
        );
        Ok(graph)
    }

    /// Builds a graph from vertex labels and an edge list.
    ///
    /// Dependency counts are taken from each vertex's in-degree, which
    /// matches [`CourseGraph::build`] for graphs built from a table.
    pub fn from_parts(
        title: impl Into<String>,
        names: Vec<String>,
        edges: &[(usize, usize)],
        size_range: SizeRange,
    ) -> GraphResult<Self> {
        let mut counts = vec![0; names.len()];
        for &(_, to) in edges {
            if let Some(count) = counts.get_mut(to) {
                *count += 1;
            }
        }
        Self::assemble(&title.into(), names, &counts, edges, size_range)
    }

    /// Rebuilds a course graph from a parsed GML document.
    ///
    /// Stored `size` attributes are kept when every node has one; otherwise
    /// sizes are normalized from in-degrees into `size_range`.
    pub fn from_gml(gml: &GmlGraph, size_range: SizeRange) -> GraphResult<Self> {
        if !gml.directed {
            warn!("GML graph is not marked directed, reading edges as prerequisite -> course");
        }

        let names = gml.nodes.iter().map(|n| n.label.clone()).collect();
        let title = gml.title.clone().unwrap_or_default();
        let mut graph = Self::from_parts(title, names, &gml.edges, size_range)?;

        if let Some(sizes) = gml.nodes.iter().map(|n| n.size).collect::<Option<Vec<f64>>>() {
            for (node, size) in graph.graph.node_weights_mut().zip(sizes) {
                node.size = size;
            }
        }
        Ok(graph)
    }

    fn assemble(
        title: &str,
        names: Vec<String>,
        counts: &[usize],
        edges: &[(usize, usize)],
        size_range: SizeRange,
    ) -> GraphResult<Self> {
        let vertex_count = names.len();
        let sizes = size_range.normalize(counts);
        let mut graph = DiGraph::with_capacity(vertex_count, edges.len());

        for (id, name) in names.into_iter().enumerate() {
            graph.add_node(CourseNode {
                id,
                name,
                dependency_count: counts[id],
                size: sizes[id],
            });
        }

        for &(from, to) in edges {
            if from >= vertex_count || to >= vertex_count {
                return Err(GraphError::EdgeOutOfRange {
                    from,
                    to,
                    vertex_count,
                });
            }
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }

        Ok(Self {
            graph,
            title: title.to_string(),
        })
    }

    /// Returns the graph title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the number of vertices (one per course row).
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns all vertices in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &CourseNode> {
        self.graph.node_weights()
    }

    /// Returns the vertex with the given id.
    pub fn node(&self, id: usize) -> Option<&CourseNode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Returns vertex labels in id order.
    pub fn labels(&self) -> Vec<&str> {
        self.nodes().map(|n| n.name.as_str()).collect()
    }

    /// Returns vertex display sizes in id order.
    pub fn sizes(&self) -> Vec<f64> {
        self.nodes().map(|n| n.size).collect()
    }

    /// Returns `(prerequisite, course)` pairs in insertion order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Returns the prerequisites of a course (incoming edges).
    ///
    /// A prerequisite listed twice appears twice.
    pub fn prerequisites_of(&self, id: usize) -> Vec<&CourseNode> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Returns the courses that require this one (outgoing edges).
    pub fn dependents_of(&self, id: usize) -> Vec<&CourseNode> {
        self.neighbours(id, Direction::Outgoing)
    }

    fn neighbours(&self, id: usize, direction: Direction) -> Vec<&CourseNode> {
        if id >= self.node_count() {
            return Vec::new();
        }

        let mut found: Vec<&CourseNode> = self
            .graph
            .edges_directed(NodeIndex::new(id), direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                self.graph.node_weight(other)
            })
            .collect();
        // petgraph walks adjacency lists newest-first
        found.reverse();
        found
    }
}

//! JSON export implementation.
//!
//! Exports the course graph as a node-link JSON document.

use super::Exporter;
use crate::graph::CourseGraph;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable course vertex for JSON output.
#[derive(Serialize)]
struct JsonNode<'a> {
    id: usize,
    label: &'a str,
    dependency_count: usize,
    size: f64,
}

/// Serializable prerequisite edge for JSON output.
#[derive(Serialize)]
struct JsonEdge {
    source: usize,
    target: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    title: &'a str,
    directed: bool,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, graph: &CourseGraph, writer: &mut W) -> io::Result<()> {
        let nodes = graph
            .nodes()
            .map(|n| JsonNode {
                id: n.id,
                label: &n.name,
                dependency_count: n.dependency_count,
                size: n.size,
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(source, target)| JsonEdge { source, target })
            .collect();

        let export = JsonExport {
            title: graph.title(),
            directed: true,
            nodes,
            edges,
        };

        serde_json::to_writer_pretty(&mut *writer, &export)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(writer)?;

        Ok(())
    }
}

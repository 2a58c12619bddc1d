//! Graphviz DOT export implementation.

use super::Exporter;
use crate::graph::CourseGraph;
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

impl DotExporter {
    /// Escape a string for use inside a double-quoted DOT ID.
    fn escape_id(value: &str) -> String {
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, graph: &CourseGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph courses {{")?;
        writeln!(writer, "    label=\"{}\";", Self::escape_id(graph.title()))?;
        writeln!(writer, "    node [shape=circle, fixedsize=true, style=filled, fillcolor=white];")?;

        for node in graph.nodes() {
            writeln!(
                writer,
                "    n{} [label=\"{}\", width={}];",
                node.id,
                Self::escape_id(&node.name),
                node.size
            )?;
        }

        for (from, to) in graph.edges() {
            writeln!(writer, "    n{} -> n{};", from, to)?;
        }

        writeln!(writer, "}}")
    }
}

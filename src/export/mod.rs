//! Export functionality for course graphs.
//!
//! This module provides exporters for persisting a [`CourseGraph`] in
//! various graph formats: GML (the default), JSON and Graphviz DOT.

pub mod dot;
pub mod gml;
pub mod json;

use crate::graph::CourseGraph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// GML format - portable graph markup, re-importable
    #[default]
    Gml,
    /// JSON format - node-link document
    Json,
    /// DOT format - Graphviz input
    Dot,
}

impl ExportFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "gml" => Some(ExportFormat::Gml),
            "json" => Some(ExportFormat::Json),
            "dot" | "gv" => Some(ExportFormat::Dot),
            _ => None,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gml" => Ok(ExportFormat::Gml),
            "json" => Ok(ExportFormat::Json),
            "dot" | "gv" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: gml, json, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Gml => write!(f, "gml"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the graph to the given writer.
    fn export<W: Write>(&self, graph: &CourseGraph, writer: &mut W) -> io::Result<()>;
}

/// Export a graph in the specified format.
pub fn export<W: Write>(format: ExportFormat, graph: &CourseGraph, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Gml => gml::GmlExporter.export(graph, writer),
        ExportFormat::Json => json::JsonExporter.export(graph, writer),
        ExportFormat::Dot => dot::DotExporter.export(graph, writer),
    }
}

/// Export a graph to a string.
pub fn export_to_string(format: ExportFormat, graph: &CourseGraph) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, graph, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Export a graph to a file, replacing any existing file.
pub fn export_to_file(format: ExportFormat, graph: &CourseGraph, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export(format, graph, &mut writer)?;
    writer.flush()
}

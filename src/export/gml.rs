//! GML (Graph Modelling Language) export and import.
//!
//! The writer emits one `node` block per course (`id`, `label`, `size`) and
//! one `edge` block per prerequisite link (`source`, `target`), inside a
//! directed `graph` block carrying the graph `title`. The reader accepts
//! any GML document with that shape, ignoring keys it does not know.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::Exporter;
use crate::graph::CourseGraph;

/// GML exporter implementation.
pub struct GmlExporter;

impl GmlExporter {
    /// Escape a string value for GML.
    ///
    /// GML strings cannot contain a bare `"`, so quotes and ampersands are
    /// written as HTML entities.
    fn escape_string(value: &str) -> String {
        value.replace('&', "&amp;").replace('"', "&quot;")
    }
}

impl Exporter for GmlExporter {
    fn export<W: Write>(&self, graph: &CourseGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Creator \"coursegraph {}\"", env!("CARGO_PKG_VERSION"))?;
        writeln!(writer, "Version 1")?;
        writeln!(writer, "graph")?;
        writeln!(writer, "[")?;
        writeln!(writer, "  directed 1")?;
        writeln!(writer, "  title \"{}\"", Self::escape_string(graph.title()))?;

        for node in graph.nodes() {
            writeln!(writer, "  node")?;
            writeln!(writer, "  [")?;
            writeln!(writer, "    id {}", node.id)?;
            writeln!(writer, "    label \"{}\"", Self::escape_string(&node.name))?;
            writeln!(writer, "    size {}", node.size)?;
            writeln!(writer, "  ]")?;
        }

        for (from, to) in graph.edges() {
            writeln!(writer, "  edge")?;
            writeln!(writer, "  [")?;
            writeln!(writer, "    source {}", from)?;
            writeln!(writer, "    target {}", to)?;
            writeln!(writer, "  ]")?;
        }

        writeln!(writer, "]")
    }
}

/// Errors that can occur while reading GML.
#[derive(Debug, thiserror::Error)]
pub enum GmlError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The text is not well-formed GML.
    #[error("GML syntax error at line {line}: {message}")]
    Syntax {
        /// 1-based line of the offending token
        line: usize,
        /// What went wrong
        message: String,
    },

    /// There is no top-level `graph [...]` block.
    #[error("GML document has no graph section")]
    MissingGraph,

    /// A `node` or `edge` block lacks a required key.
    #[error("GML {element} is missing '{key}'")]
    MissingKey {
        /// `node` or `edge`
        element: &'static str,
        /// The absent key
        key: &'static str,
    },

    /// Two nodes share the same id.
    #[error("Duplicate GML node id {0}")]
    DuplicateNode(i64),

    /// An edge endpoint does not match any node id.
    #[error("GML edge references unknown node id {0}")]
    UnknownNode(i64),
}

/// Result type alias for GML reading.
pub type GmlResult<T> = Result<T, GmlError>;

/// A parsed GML value.
#[derive(Debug, Clone, PartialEq)]
pub enum GmlValue {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<(String, GmlValue)>),
}

/// A node read from GML.
#[derive(Debug, Clone, PartialEq)]
pub struct GmlNode {
    /// The node's GML id
    pub id: i64,
    /// The `label` attribute, empty when absent
    pub label: String,
    /// The `size` attribute, if present
    pub size: Option<f64>,
}

/// A graph read from GML.
///
/// Edge endpoints are positions in `nodes`, not GML ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GmlGraph {
    pub directed: bool,
    pub title: Option<String>,
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<(usize, usize)>,
}

/// Reads a GML file.
pub fn parse_file(path: &Path) -> GmlResult<GmlGraph> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses GML text.
///
/// # Example
///
/// ```
/// use coursegraph::export::gml::parse_str;
///
/// let gml = r#"graph [ directed 1 node [ id 7 label "Intro" ] node [ id 9 label "Advanced" ]
///              edge [ source 7 target 9 ] ]"#;
/// let graph = parse_str(gml).unwrap();
///
/// assert!(graph.directed);
/// assert_eq!(graph.nodes[1].label, "Advanced");
/// assert_eq!(graph.edges, vec![(0, 1)]);
/// ```
pub fn parse_str(content: &str) -> GmlResult<GmlGraph> {
    let document = Parser::new(tokenize(content)?).parse_list(false)?;

    let items = document
        .iter()
        .find_map(|(key, value)| match (key.as_str(), value) {
            ("graph", GmlValue::List(items)) => Some(items),
            _ => None,
        })
        .ok_or(GmlError::MissingGraph)?;

    let mut graph = GmlGraph::default();
    let mut raw_edges = Vec::new();

    for (key, value) in items {
        match (key.as_str(), value) {
            ("directed", GmlValue::Int(flag)) => graph.directed = *flag != 0,
            ("title", GmlValue::Str(title)) => graph.title = Some(title.clone()),
            ("node", GmlValue::List(attrs)) => graph.nodes.push(GmlNode {
                id: int_attr(attrs, "id").ok_or(GmlError::MissingKey {
                    element: "node",
                    key: "id",
                })?,
                label: str_attr(attrs, "label").unwrap_or_default(),
                size: real_attr(attrs, "size"),
            }),
            ("edge", GmlValue::List(attrs)) => {
                let from = int_attr(attrs, "source").ok_or(GmlError::MissingKey {
                    element: "edge",
                    key: "source",
                })?;
                let to = int_attr(attrs, "target").ok_or(GmlError::MissingKey {
                    element: "edge",
                    key: "target",
                })?;
                raw_edges.push((from, to));
            }
            _ => {}
        }
    }

    let mut positions = HashMap::with_capacity(graph.nodes.len());
    for (position, node) in graph.nodes.iter().enumerate() {
        if positions.insert(node.id, position).is_some() {
            return Err(GmlError::DuplicateNode(node.id));
        }
    }

    let resolve = |id: i64| positions.get(&id).copied().ok_or(GmlError::UnknownNode(id));
    graph.edges = raw_edges
        .into_iter()
        .map(|(from, to)| -> GmlResult<(usize, usize)> { Ok((resolve(from)?, resolve(to)?)) })
        .collect::<GmlResult<Vec<_>>>()?;

    Ok(graph)
}

fn attr<'a>(attrs: &'a [(String, GmlValue)], key: &str) -> Option<&'a GmlValue> {
    attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn int_attr(attrs: &[(String, GmlValue)], key: &str) -> Option<i64> {
    match attr(attrs, key)? {
        GmlValue::Int(i) => Some(*i),
        _ => None,
    }
}

fn real_attr(attrs: &[(String, GmlValue)], key: &str) -> Option<f64> {
    match attr(attrs, key)? {
        GmlValue::Int(i) => Some(*i as f64),
        GmlValue::Real(r) => Some(*r),
        _ => None,
    }
}

fn str_attr(attrs: &[(String, GmlValue)], key: &str) -> Option<String> {
    match attr(attrs, key)? {
        GmlValue::Str(s) => Some(s.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

fn tokenize(content: &str) -> GmlResult<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '[' => {
                chars.next();
                tokens.push((line, Token::Open));
            }
            ']' => {
                chars.next();
                tokens.push((line, Token::Close));
            }
            '"' => {
                chars.next();
                let start = line;
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            text.push(ch);
                        }
                        None => {
                            return Err(GmlError::Syntax {
                                line: start,
                                message: "unterminated string".to_string(),
                            })
                        }
                    }
                }
                tokens.push((start, Token::Str(unescape(&text))));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((line, parse_number(&text, line)?));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut key = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        key.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((line, Token::Key(key)));
            }
            other => {
                return Err(GmlError::Syntax {
                    line,
                    message: format!("unexpected character '{}'", other),
                })
            }
        }
    }

    Ok(tokens)
}

fn parse_number(text: &str, line: usize) -> GmlResult<Token> {
    let invalid = || GmlError::Syntax {
        line,
        message: format!("invalid number '{}'", text),
    };

    if !text.contains(['.', 'e', 'E']) {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Token::Int(i));
        }
    }
    text.parse::<f64>().map(Token::Real).map_err(|_| invalid())
}

fn unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

struct Parser {
    tokens: std::vec::IntoIter<(usize, Token)>,
    line: usize,
}

impl Parser {
    fn new(tokens: Vec<(usize, Token)>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            line: 1,
        }
    }

    fn next(&mut self) -> Option<Token> {
        let (line, token) = self.tokens.next()?;
        self.line = line;
        Some(token)
    }

    fn syntax(&self, message: impl Into<String>) -> GmlError {
        GmlError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn parse_list(&mut self, nested: bool) -> GmlResult<Vec<(String, GmlValue)>> {
        let mut items = Vec::new();
        loop {
            match self.next() {
                None if nested => return Err(self.syntax("unclosed '['")),
                None => return Ok(items),
                Some(Token::Close) if nested => return Ok(items),
                Some(Token::Key(key)) => {
                    let value = self.parse_value(&key)?;
                    items.push((key, value));
                }
                Some(other) => return Err(self.syntax(format!("expected a key, found {:?}", other))),
            }
        }
    }

    fn parse_value(&mut self, key: &str) -> GmlResult<GmlValue> {
        match self.next() {
            Some(Token::Int(i)) => Ok(GmlValue::Int(i)),
            Some(Token::Real(r)) => Ok(GmlValue::Real(r)),
            Some(Token::Str(s)) => Ok(GmlValue::Str(s)),
            Some(Token::Open) => Ok(GmlValue::List(self.parse_list(true)?)),
            Some(other) => Err(self.syntax(format!("expected a value for '{}', found {:?}", key, other))),
            None => Err(self.syntax(format!("missing value for '{}'", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{export_to_string, ExportFormat};
    use crate::graph::{CourseGraph, GraphOptions, SizeRange};
    use crate::parser::{CourseRow, CourseTable};

    fn sample_graph() -> CourseGraph {
        let table = CourseTable::from_rows(vec![
            CourseRow::new("Intro", ""),
            CourseRow::new("Data Structures", "Intro"),
            CourseRow::new("Algorithms", "Intro,Data Structures"),
            CourseRow::new("Capstone", "Algorithms,Algorithms"),
        ]);
        CourseGraph::build(&table, &GraphOptions::default()).unwrap()
    }

    #[test]
    fn test_gml_export_structure() {
        let graph = CourseGraph::from_parts(
            "UMich Course Dependencies",
            vec!["Intro".to_string(), "Advanced".to_string()],
            &[(0, 1)],
            SizeRange::default(),
        )
        .unwrap();
        let gml = export_to_string(ExportFormat::Gml, &graph).unwrap();
        let lines: Vec<&str> = gml.lines().collect();

        assert!(lines[0].starts_with("Creator \"coursegraph "));
        assert_eq!(lines[1], "Version 1");
        assert_eq!(lines[2], "graph");
        assert_eq!(lines[3], "[");
        assert_eq!(lines[4], "  directed 1");
        assert_eq!(lines[5], "  title \"UMich Course Dependencies\"");
        assert!(lines.contains(&"    label \"Intro\""));
        assert!(lines.contains(&"    label \"Advanced\""));
        assert!(lines.contains(&"    source 0"));
        assert!(lines.contains(&"    target 1"));
        assert_eq!(lines.iter().filter(|l| **l == "  node").count(), 2);
        assert_eq!(lines.iter().filter(|l| **l == "  edge").count(), 1);
        assert_eq!(*lines.last().unwrap(), "]");
    }

    #[test]
    fn test_gml_escape_string() {
        assert_eq!(GmlExporter::escape_string("plain"), "plain");
        assert_eq!(GmlExporter::escape_string("a \"b\""), "a &quot;b&quot;");
        assert_eq!(GmlExporter::escape_string("R&D"), "R&amp;D");
    }

    #[test]
    fn test_gml_round_trip() {
        let graph = sample_graph();
        let gml = export_to_string(ExportFormat::Gml, &graph).unwrap();
        let parsed = parse_str(&gml).unwrap();

        assert!(parsed.directed);
        assert_eq!(parsed.title.as_deref(), Some(graph.title()));
        assert_eq!(parsed.nodes.len(), graph.node_count());

        let labels: Vec<&str> = parsed.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, graph.labels());

        let sizes: Vec<f64> = parsed.nodes.iter().map(|n| n.size.unwrap()).collect();
        assert_eq!(sizes, graph.sizes());

        let mut expected = graph.edges();
        let mut actual = parsed.edges.clone();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);

        let rebuilt = CourseGraph::from_gml(&parsed, SizeRange::default()).unwrap();
        assert_eq!(rebuilt.node_count(), graph.node_count());
        assert_eq!(rebuilt.labels(), graph.labels());
        assert_eq!(rebuilt.edges(), graph.edges());
    }

    #[test]
    fn test_gml_round_trip_special_labels() {
        let graph = CourseGraph::from_parts(
            "R&D \"Track\"",
            vec!["The \"Big\" One".to_string(), "Q&A, Part 1".to_string()],
            &[(0, 1)],
            SizeRange::default(),
        )
        .unwrap();
        let parsed = parse_str(&export_to_string(ExportFormat::Gml, &graph).unwrap()).unwrap();

        assert_eq!(parsed.title.as_deref(), Some("R&D \"Track\""));
        assert_eq!(parsed.nodes[0].label, "The \"Big\" One");
        assert_eq!(parsed.nodes[1].label, "Q&A, Part 1");
    }

    #[test]
    fn test_parse_ignores_unknown_keys_and_comments() {
        let gml = "# produced elsewhere\nCreator \"x\"\ngraph [\n  directed 0\n  weird [ a 1 b [ c \"d\" ] ]\n  node [ id 1 label \"A\" color \"red\" ]\n  node [ id 2 ]\n  edge [ source 2 target 1 weight 0.5 ]\n]\n";
        let graph = parse_str(gml).unwrap();

        assert!(!graph.directed);
        assert_eq!(graph.title, None);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].label, "");
        assert_eq!(graph.nodes[0].size, None);
        assert_eq!(graph.edges, vec![(1, 0)]);
    }

    #[test]
    fn test_parse_numbers() {
        let graph = parse_str("graph [ node [ id -3 size 1 ] node [ id 4 size 2.5e-1 ] ]").unwrap();

        assert_eq!(graph.nodes[0].id, -3);
        assert_eq!(graph.nodes[0].size, Some(1.0));
        assert_eq!(graph.nodes[1].size, Some(0.25));
    }

    #[test]
    fn test_parse_missing_graph() {
        assert!(matches!(parse_str("Version 1"), Err(GmlError::MissingGraph)));
        assert!(matches!(parse_str(""), Err(GmlError::MissingGraph)));
    }

    #[test]
    fn test_parse_unknown_edge_endpoint() {
        let err = parse_str("graph [ node [ id 0 ] edge [ source 0 target 5 ] ]").unwrap_err();
        assert!(matches!(err, GmlError::UnknownNode(5)));
    }

    #[test]
    fn test_parse_duplicate_node() {
        let err = parse_str("graph [ node [ id 0 ] node [ id 0 ] ]").unwrap_err();
        assert!(matches!(err, GmlError::DuplicateNode(0)));
    }

    #[test]
    fn test_parse_missing_keys() {
        let err = parse_str("graph [ node [ label \"A\" ] ]").unwrap_err();
        assert!(matches!(err, GmlError::MissingKey { element: "node", key: "id" }));

        let err = parse_str("graph [ node [ id 0 ] edge [ source 0 ] ]").unwrap_err();
        assert!(matches!(err, GmlError::MissingKey { element: "edge", key: "target" }));
    }

    #[test]
    fn test_parse_syntax_errors() {
        assert!(matches!(
            parse_str("graph [ node [ id 0 ]"),
            Err(GmlError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("graph [\n  title \"open\n]"),
            Err(GmlError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            parse_str("graph [ id ]"),
            Err(GmlError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("graph [ id 1.2.3 ]"),
            Err(GmlError::Syntax { .. })
        ));
        assert!(matches!(parse_str("graph { }"), Err(GmlError::Syntax { .. })));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.gml");
        std::fs::write(&path, "graph [ directed 1 node [ id 0 label \"A\" ] ]").unwrap();

        let graph = parse_file(&path).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert!(matches!(
            parse_file(&dir.path().join("missing.gml")),
            Err(GmlError::IoError(_))
        ));
    }
}

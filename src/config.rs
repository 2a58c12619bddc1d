//! Pipeline configuration.
//!
//! [`PipelineConfig::default`] reproduces the fixed behaviour of the tool:
//! read `course_dependencies.csv`, write `umich_courses.gml`, lay the graph
//! out on a grid and display it.

use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::graph::GraphOptions;
use crate::layout::LayoutKind;

/// Default input CSV path.
pub const DEFAULT_INPUT: &str = "course_dependencies.csv";

/// Default graph output path.
pub const DEFAULT_OUTPUT: &str = "umich_courses.gml";

/// Default image path for headless rendering.
pub const DEFAULT_IMAGE: &str = "umich_courses.svg";

/// How the laid-out graph is shown once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Terminal viewer when stdout is a terminal, SVG image otherwise
    #[default]
    Auto,
    /// Interactive terminal viewer
    Terminal,
    /// Write an SVG image
    Svg,
    /// No display
    None,
}

impl DisplayMode {
    /// Resolves [`DisplayMode::Auto`] against whether stdout is a terminal.
    pub fn resolve(self, interactive: bool) -> Self {
        match self {
            DisplayMode::Auto if interactive => DisplayMode::Terminal,
            DisplayMode::Auto => DisplayMode::Svg,
            other => other,
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DisplayMode::Auto),
            "terminal" | "tui" => Ok(DisplayMode::Terminal),
            "svg" | "image" => Ok(DisplayMode::Svg),
            "none" => Ok(DisplayMode::None),
            _ => Err(format!(
                "Unknown display mode: '{}'. Valid modes: auto, terminal, svg, none",
                s
            )),
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Auto => write!(f, "auto"),
            DisplayMode::Terminal => write!(f, "terminal"),
            DisplayMode::Svg => write!(f, "svg"),
            DisplayMode::None => write!(f, "none"),
        }
    }
}

/// Everything one run of the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Course CSV to read
    pub input: PathBuf,
    /// Graph file to write
    pub output: PathBuf,
    /// Output format; inferred from `output` when `None`
    pub format: Option<ExportFormat>,
    /// Image written in SVG display mode
    pub image: PathBuf,
    /// Display mode
    pub display: DisplayMode,
    /// Vertex placement
    pub layout: LayoutKind,
    /// Graph construction options
    pub graph: GraphOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: None,
            image: PathBuf::from(DEFAULT_IMAGE),
            display: DisplayMode::default(),
            layout: LayoutKind::default(),
            graph: GraphOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// The format the output file is written in.
    ///
    /// An explicit format wins, then the output extension, then GML.
    pub fn export_format(&self) -> ExportFormat {
        self.format
            .or_else(|| ExportFormat::from_path(&self.output))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DuplicatePolicy, SizeRange, WhitespacePolicy, DEFAULT_TITLE};

    #[test]
    fn test_defaults_match_fixed_behaviour() {
        let config = PipelineConfig::default();

        assert_eq!(config.input, PathBuf::from("course_dependencies.csv"));
        assert_eq!(config.output, PathBuf::from("umich_courses.gml"));
        assert_eq!(config.export_format(), ExportFormat::Gml);
        assert_eq!(config.layout, LayoutKind::Grid);
        assert_eq!(config.graph.title, DEFAULT_TITLE);
        assert_eq!(config.graph.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.graph.whitespace, WhitespacePolicy::Strict);
        assert_eq!(config.graph.size_range, SizeRange::default());
    }

    #[test]
    fn test_export_format_resolution() {
        let mut config = PipelineConfig {
            output: PathBuf::from("graph.json"),
            ..PipelineConfig::default()
        };
        assert_eq!(config.export_format(), ExportFormat::Json);

        config.format = Some(ExportFormat::Dot);
        assert_eq!(config.export_format(), ExportFormat::Dot);

        config.format = None;
        config.output = PathBuf::from("graph.out");
        assert_eq!(config.export_format(), ExportFormat::Gml);
    }

    #[test]
    fn test_display_mode_resolve() {
        assert_eq!(DisplayMode::Auto.resolve(true), DisplayMode::Terminal);
        assert_eq!(DisplayMode::Auto.resolve(false), DisplayMode::Svg);
        assert_eq!(DisplayMode::None.resolve(true), DisplayMode::None);
        assert_eq!(DisplayMode::Terminal.resolve(false), DisplayMode::Terminal);
    }

    #[test]
    fn test_display_mode_from_str() {
        assert_eq!("auto".parse::<DisplayMode>().unwrap(), DisplayMode::Auto);
        assert_eq!("TUI".parse::<DisplayMode>().unwrap(), DisplayMode::Terminal);
        assert_eq!("svg".parse::<DisplayMode>().unwrap(), DisplayMode::Svg);
        assert_eq!("none".parse::<DisplayMode>().unwrap(), DisplayMode::None);
        assert!("window".parse::<DisplayMode>().is_err());
        assert_eq!(DisplayMode::Svg.to_string(), "svg");
    }
}

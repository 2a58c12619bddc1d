//! CLI argument parsing using `clap`.
//!
//! Running with no arguments builds the graph from the default paths.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{DisplayMode, PipelineConfig, DEFAULT_IMAGE, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::export::ExportFormat;
use crate::graph::{DuplicatePolicy, GraphError, GraphOptions, SizeRange, WhitespacePolicy, DEFAULT_TITLE};
use crate::layout::LayoutKind;

/// Command-line arguments for `coursegraph`.
#[derive(Debug, Clone, Parser)]
#[command(name = "coursegraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Build, export and display a course prerequisite graph from a CSV", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: BuildArgs,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSEGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read a GML graph file and print its courses and prerequisites
    Inspect {
        /// GML file to read
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Show version information
    Version,
}

/// Options for the default build run.
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Course CSV with `Course_Name` and `Dependencies` columns
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Graph file to write
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format (gml, json, dot); inferred from the output extension if omitted
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Vertex layout (grid, circle)
    #[arg(long, value_name = "LAYOUT", default_value = "grid")]
    pub layout: LayoutKind,

    /// How to show the graph (auto, terminal, svg, none)
    #[arg(long, value_name = "MODE", default_value = "auto")]
    pub display: DisplayMode,

    /// Image path used when the display mode is svg
    #[arg(long, value_name = "PATH", default_value = DEFAULT_IMAGE)]
    pub image: PathBuf,

    /// Graph title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Smallest vertex size
    #[arg(long, default_value_t = 0.2)]
    pub min_size: f64,

    /// Largest vertex size
    #[arg(long, default_value_t = 0.8)]
    pub max_size: f64,

    /// Trim whitespace around dependency names before lookup
    #[arg(long)]
    pub trim_whitespace: bool,

    /// Let a repeated course name resolve to its last row instead of failing
    #[arg(long)]
    pub allow_duplicate_names: bool,
}

impl BuildArgs {
    /// Converts the parsed flags into a pipeline configuration.
    pub fn into_config(self) -> Result<PipelineConfig, GraphError> {
        let graph = GraphOptions {
            title: self.title,
            duplicates: if self.allow_duplicate_names {
                DuplicatePolicy::LastWins
            } else {
                DuplicatePolicy::Reject
            },
            whitespace: if self.trim_whitespace {
                WhitespacePolicy::Trim
            } else {
                WhitespacePolicy::Strict
            },
            size_range: SizeRange::new(self.min_size, self.max_size)?,
        };

        Ok(PipelineConfig {
            input: self.input,
            output: self.output,
            format: self.format,
            image: self.image,
            display: self.display,
            layout: self.layout,
            graph,
        })
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `Cli::parse()`.
pub fn parse() -> Cli {
    Cli::parse()
}

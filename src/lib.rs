//! CourseGraph - course prerequisite graph builder
//!
//! This crate reads a CSV of courses and their prerequisites, builds a
//! directed dependency graph, exports it to GML (or JSON/DOT), and shows
//! it in the terminal or as an SVG image.

pub mod cli;
pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod ui;

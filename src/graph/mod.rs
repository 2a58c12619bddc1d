//! Graph module for course prerequisite modeling.
//!
//! Turns a loaded [`CourseTable`](crate::parser::CourseTable) into a
//! [`CourseGraph`]: course names are resolved to row positions, each
//! `Dependencies` cell is decoded into a tagged [`Dependencies`] value, and
//! every listed prerequisite becomes an edge into the course that lists it.
//!
//! # Example
//!
//! ```rust
//! use coursegraph::graph::{CourseGraph, GraphOptions};
//! use coursegraph::parser::parse_str;
//!
//! let table = parse_str("Course_Name,Dependencies\nA,\nB,\nC,\"A,B\"\n").unwrap();
//! let graph = CourseGraph::build(&table, &GraphOptions::default()).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edges(), vec![(0, 2), (1, 2)]);
//! ```

mod course_graph;
mod course_index;
mod dependencies;
mod error;
mod sizing;

pub use course_graph::{expand_edges, CourseGraph, CourseNode, GraphOptions, DEFAULT_TITLE};
pub use course_index::{CourseIndex, DuplicatePolicy};
pub use dependencies::{Dependencies, WhitespacePolicy};
pub use error::{GraphError, GraphResult};
pub use sizing::SizeRange;

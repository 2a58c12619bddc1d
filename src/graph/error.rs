//! Error types for course graph construction.

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while resolving names and assembling the graph.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    /// Two rows share the same course name.
    #[error("Duplicate course name '{name}' at rows {first} and {second}")]
    DuplicateCourse {
        /// The repeated course name
        name: String,
        /// Row of the first occurrence
        first: usize,
        /// Row of the repeated occurrence
        second: usize,
    },

    /// A dependency list names a course that is not in the table.
    #[error("Course '{course}' depends on unknown course '{dependency}'")]
    UnknownDependency {
        /// The course whose dependency list was being decoded
        course: String,
        /// The name that could not be resolved
        dependency: String,
    },

    /// The vertex size range is not a finite, ordered interval.
    #[error("Invalid vertex size range [{min}, {max}]")]
    InvalidSizeRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// An edge endpoint does not name an existing vertex.
    #[error("Edge ({from}, {to}) references a vertex outside 0..{vertex_count}")]
    EdgeOutOfRange {
        /// Prerequisite vertex id
        from: usize,
        /// Dependent vertex id
        to: usize,
        /// Number of vertices in the graph
        vertex_count: usize,
    },
}

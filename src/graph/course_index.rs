//! Course name resolution.
//!
//! Maps each course name to the zero-based position of its row in the
//! source table. The index is built once and is read-only afterwards.

use std::collections::HashMap;

use tracing::warn;

use super::error::{GraphError, GraphResult};
use crate::parser::CourseTable;

/// How to treat a course name that appears on more than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`GraphError::DuplicateCourse`]
    #[default]
    Reject,
    /// The name resolves to its last occurrence
    LastWins,
}

/// Immutable mapping from course name to vertex id.
///
/// # Example
///
/// ```
/// use coursegraph::graph::{CourseIndex, DuplicatePolicy};
/// use coursegraph::parser::{CourseRow, CourseTable};
///
/// let table = CourseTable::from_rows(vec![
///     CourseRow::new("Intro", ""),
///     CourseRow::new("Advanced", "Intro"),
/// ]);
/// let index = CourseIndex::build(&table, DuplicatePolicy::Reject).unwrap();
///
/// assert_eq!(index.get("Intro"), Some(0));
/// assert_eq!(index.get("Advanced"), Some(1));
/// assert_eq!(index.get("Missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseIndex {
    ids: HashMap<String, usize>,
}

impl CourseIndex {
    /// Builds the index from the table's row order.
    pub fn build(table: &CourseTable, policy: DuplicatePolicy) -> GraphResult<Self> {
        let mut ids = HashMap::with_capacity(table.len());

        for (row, course) in table.iter().enumerate() {
            if let Some(first) = ids.insert(course.name.clone(), row) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(GraphError::DuplicateCourse {
                            name: course.name.clone(),
                            first,
                            second: row,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        warn!(course = %course.name, first, row, "duplicate course name aliases to later row");
                    }
                }
            }
        }

        Ok(Self { ids })
    }

    /// Looks up the vertex id of a course.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Returns the number of distinct course names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no course names are indexed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

//! Shared types for course table parsing.
//!
//! This module defines the in-memory representation of the course CSV
//! once it has been loaded and its missing cells filled with empty strings.

/// Header name of the column holding each course's unique name.
pub const COURSE_NAME_COLUMN: &str = "Course_Name";

/// Header name of the column holding the comma-separated prerequisite list.
pub const DEPENDENCIES_COLUMN: &str = "Dependencies";

/// A single data row of the course table.
///
/// # Example
///
/// ```
/// use coursegraph::parser::CourseRow;
///
/// let row = CourseRow::new("Advanced", "Intro");
/// assert_eq!(row.name, "Advanced");
/// assert_eq!(row.dependencies, "Intro");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Course name (the `Course_Name` cell)
    pub name: String,
    /// Raw prerequisite list (the `Dependencies` cell), possibly empty
    pub dependencies: String,
}

impl CourseRow {
    /// Creates a new course row.
    pub fn new(name: impl Into<String>, dependencies: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: dependencies.into(),
        }
    }
}

/// The loaded course table, in source row order.
///
/// Row position is significant: it becomes the course's vertex id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseTable {
    rows: Vec<CourseRow>,
}

impl CourseTable {
    /// Creates a table from rows in source order.
    pub fn from_rows(rows: Vec<CourseRow>) -> Self {
        Self { rows }
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows in source order.
    pub fn rows(&self) -> &[CourseRow] {
        &self.rows
    }

    /// Iterates over the rows in source order.
    pub fn iter(&self) -> impl Iterator<Item = &CourseRow> {
        self.rows.iter()
    }

    /// Returns the course names in source order.
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }
}

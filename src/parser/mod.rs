//! Parser module for course dependency tables.
//!
//! Loads the course CSV (`Course_Name`, `Dependencies`) into a
//! [`CourseTable`], filling missing cells with empty strings.
//!
//! # Example
//!
//! ```
//! use coursegraph::parser::parse_str;
//!
//! let table = parse_str("Course_Name,Dependencies\nIntro,\nAdvanced,Intro\n").unwrap();
//! assert_eq!(table.names(), vec!["Intro", "Advanced"]);
//! ```

pub mod course_csv;
pub mod types;

pub use course_csv::{parse_file, parse_str, LoadError, LoadResult};

pub use types::{CourseRow, CourseTable, COURSE_NAME_COLUMN, DEPENDENCIES_COLUMN};

//! Loader for course dependency CSV files.
//!
//! Reads a CSV with at least the `Course_Name` and `Dependencies` columns
//! into a [`CourseTable`]. Missing cells become empty strings; other
//! columns are ignored.

use std::fs;
use std::path::Path;

use super::types::{CourseRow, CourseTable, COURSE_NAME_COLUMN, DEPENDENCIES_COLUMN};

/// Errors that can occur while loading the course CSV.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input has no header row at all.
    #[error("CSV input is empty: expected a header row")]
    Empty,

    /// A required column is absent from the header row.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// The CSV text could not be split into records.
    #[error("Malformed CSV at line {line}: {message}")]
    Malformed {
        /// 1-based line on which the offending record starts
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A raw CSV record together with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Parses a course CSV file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use coursegraph::parser::parse_file;
///
/// let table = parse_file(Path::new("course_dependencies.csv")).unwrap();
/// println!("{} courses", table.len());
/// ```
pub fn parse_file(path: &Path) -> LoadResult<CourseTable> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses course CSV content from a string.
///
/// # Example
///
/// ```
/// use coursegraph::parser::parse_str;
///
/// let csv = "Course_Name,Dependencies\nIntro,\nAdvanced,Intro\n";
/// let table = parse_str(csv).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[1].dependencies, "Intro");
/// ```
pub fn parse_str(content: &str) -> LoadResult<CourseTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content)?.into_iter();

    let header = records.next().ok_or(LoadError::Empty)?;
    let name_col = column_position(&header.fields, COURSE_NAME_COLUMN)?;
    let deps_col = column_position(&header.fields, DEPENDENCIES_COLUMN)?;
    let width = header.fields.len();

    let mut rows = Vec::new();
    for record in records {
        if record.fields.len() > width {
            return Err(LoadError::Malformed {
                line: record.line,
                message: format!(
                    "expected at most {} fields, found {}",
                    width,
                    record.fields.len()
                ),
            });
        }

        let cell = |col: usize| record.fields.get(col).cloned().unwrap_or_default();
        rows.push(CourseRow::new(cell(name_col), cell(deps_col)));
    }

    Ok(CourseTable::from_rows(rows))
}

fn column_position(header: &[String], column: &str) -> LoadResult<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn(column.to_string()))
}

/// Splits CSV text into records.
///
/// Handles double-quoted fields (with `""` escapes and embedded line
/// breaks), LF, CRLF and bare CR line endings, and skips blank lines.
fn split_records(content: &str) -> LoadResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LoadError::Malformed {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, record_line, fields);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    // blank or whitespace-only line
    if fields.len() == 1 && fields[0].trim().is_empty() {
        return;
    }
    records.push(Record { line, fields });
}

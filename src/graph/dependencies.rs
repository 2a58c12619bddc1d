//! Decoding of the raw `Dependencies` cell into vertex ids.

use super::course_index::CourseIndex;
use super::error::{GraphError, GraphResult};

/// How dependency names are cleaned before lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespacePolicy {
    /// Look names up exactly as written between commas
    #[default]
    Strict,
    /// Trim surrounding whitespace from each name first
    Trim,
}

/// The decoded prerequisites of one course.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dependencies {
    /// The `Dependencies` cell was empty
    #[default]
    None,
    /// Resolved prerequisite ids, in the order listed, duplicates kept
    List(Vec<usize>),
}

impl Dependencies {
    /// Decodes a raw `Dependencies` cell for the course named `course`.
    ///
    /// An empty cell decodes to [`Dependencies::None`]. Otherwise the cell is
    /// split on `,` and every entry must name a known course.
    ///
    /// # Example
    ///
    /// ```
    /// use coursegraph::graph::{CourseIndex, Dependencies, DuplicatePolicy, WhitespacePolicy};
    /// use coursegraph::parser::{CourseRow, CourseTable};
    ///
    /// let table = CourseTable::from_rows(vec![
    ///     CourseRow::new("A", ""),
    ///     CourseRow::new("B", ""),
    ///     CourseRow::new("C", "A,B"),
    /// ]);
    /// let index = CourseIndex::build(&table, DuplicatePolicy::Reject).unwrap();
    ///
    /// let deps = Dependencies::decode("C", "A,B", &index, WhitespacePolicy::Strict).unwrap();
    /// assert_eq!(deps, Dependencies::List(vec![0, 1]));
    /// ```
    pub fn decode(
        course: &str,
        raw: &str,
        index: &CourseIndex,
        whitespace: WhitespacePolicy,
    ) -> GraphResult<Self> {
        if raw.is_empty() {
            return Ok(Self::None);
        }

        raw.split(',')
            .map(|entry| {
                let name = match whitespace {
                    WhitespacePolicy::Strict => entry,
                    WhitespacePolicy::Trim => entry.trim(),
                };
                index.get(name).ok_or_else(|| GraphError::UnknownDependency {
                    course: course.to_string(),
                    dependency: name.to_string(),
                })
            })
            .collect::<GraphResult<Vec<_>>>()
            .map(Self::List)
    }

    /// Returns the prerequisite ids (empty for [`Dependencies::None`]).
    pub fn ids(&self) -> &[usize] {
        match self {
            Self::None => &[],
            Self::List(ids) => ids,
        }
    }

    /// Returns the number of listed prerequisites, duplicates included.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Returns true if the course has no prerequisites.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DuplicatePolicy;
    use crate::parser::{CourseRow, CourseTable};

    fn index() -> CourseIndex {
        let table = CourseTable::from_rows(vec![
            CourseRow::new("Intro", ""),
            CourseRow::new("Data Structures", ""),
            CourseRow::new("Advanced", ""),
        ]);
        CourseIndex::build(&table, DuplicatePolicy::Reject).unwrap()
    }

    #[test]
    fn test_empty_cell_is_none() {
        let deps = Dependencies::decode("Intro", "", &index(), WhitespacePolicy::Strict).unwrap();

        assert_eq!(deps, Dependencies::None);
        assert!(deps.is_empty());
        assert_eq!(deps.ids(), &[] as &[usize]);
    }

    #[test]
    fn test_single_entry_is_one_element_list() {
        let deps = Dependencies::decode("Advanced", "Intro", &index(), WhitespacePolicy::Strict).unwrap();
        assert_eq!(deps, Dependencies::List(vec![0]));
    }

    #[test]
    fn test_duplicates_preserved() {
        let deps =
            Dependencies::decode("Advanced", "Intro,Intro", &index(), WhitespacePolicy::Strict).unwrap();

        assert_eq!(deps, Dependencies::List(vec![0, 0]));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_names_with_spaces_resolve() {
        let deps = Dependencies::decode(
            "Advanced",
            "Data Structures,Intro",
            &index(),
            WhitespacePolicy::Strict,
        )
        .unwrap();
        assert_eq!(deps.ids(), &[1, 0]);
    }

    #[test]
    fn test_strict_does_not_trim() {
        let err = Dependencies::decode("Advanced", "Intro, Data Structures", &index(), WhitespacePolicy::Strict)
            .unwrap_err();

        assert_eq!(
            err,
            GraphError::UnknownDependency {
                course: "Advanced".to_string(),
                dependency: " Data Structures".to_string(),
            }
        );
    }

    #[test]
    fn test_trim_policy() {
        let deps = Dependencies::decode("Advanced", "Intro, Data Structures ", &index(), WhitespacePolicy::Trim)
            .unwrap();
        assert_eq!(deps.ids(), &[0, 1]);
    }

    #[test]
    fn test_unknown_dependency() {
        let err = Dependencies::decode("Advanced", "Intro,Quantum", &index(), WhitespacePolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownDependency { ref dependency, .. } if dependency == "Quantum"));
    }

    #[test]
    fn test_trailing_comma_is_an_unknown_empty_name() {
        let err = Dependencies::decode("Advanced", "Intro,", &index(), WhitespacePolicy::Strict).unwrap_err();
        assert!(matches!(err, GraphError::UnknownDependency { ref dependency, .. } if dependency.is_empty()));
    }
}

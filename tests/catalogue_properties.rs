//! Properties that hold for every well-formed course catalogue.

use proptest::prelude::*;

use coursegraph::export::gml;
use coursegraph::export::{export_to_string, ExportFormat};
use coursegraph::graph::{CourseGraph, GraphOptions, SizeRange};
use coursegraph::parser::parse_str;

// Name stems; a stem with a comma can never appear in a dependency list.
const STEMS: &[&str] = &["EECS ", "MATH", "Q&A ", "The \"Big\" ", "Part, ", "R&D \"Lab\", "];

#[derive(Debug, Clone)]
struct Catalogue {
    names: Vec<String>,
    deps: Vec<Vec<usize>>,
}

impl Catalogue {
    fn to_csv(&self) -> String {
        let mut csv = String::from("Course_Name,Dependencies\n");
        for (name, deps) in self.names.iter().zip(&self.deps) {
            let cell = deps
                .iter()
                .map(|&d| self.names[d].as_str())
                .collect::<Vec<_>>()
                .join(",");
            csv.push_str(&format!("{},{}\n", quote(name), quote(&cell)));
        }
        csv
    }

    fn expected_edges(&self) -> Vec<(usize, usize)> {
        self.deps
            .iter()
            .enumerate()
            .flat_map(|(course, deps)| deps.iter().map(move |&d| (d, course)))
            .collect()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

// Any course may list any referenceable course, itself included, any
// number of times; roughly a quarter of rows list nothing.
fn catalogue_strategy(max_courses: usize) -> impl Strategy<Value = Catalogue> {
    (1..=max_courses).prop_flat_map(|num_courses| {
        let stems = proptest::collection::vec(0..STEMS.len(), num_courses);
        let raw_deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_courses,
        );

        (stems, raw_deps).prop_map(move |(stems, raw_deps)| {
            let names: Vec<String> = stems
                .iter()
                .enumerate()
                .map(|(i, &s)| format!("{}{}", STEMS[s], i))
                .collect();
            let referenceable: Vec<usize> = (0..num_courses)
                .filter(|&i| !names[i].contains(','))
                .collect();

            let deps = raw_deps
                .into_iter()
                .map(|raw| {
                    if referenceable.is_empty() {
                        return Vec::new();
                    }
                    raw.into_iter()
                        .map(|d| referenceable[d % referenceable.len()])
                        .collect()
                })
                .collect();

            Catalogue { names, deps }
        })
    })
}

fn build(catalogue: &Catalogue) -> CourseGraph {
    let table = match parse_str(&catalogue.to_csv()) {
        Ok(table) => table,
        Err(err) => panic!("generated CSV should load: {err}"),
    };
    match CourseGraph::build(&table, &GraphOptions::default()) {
        Ok(graph) => graph,
        Err(err) => panic!("generated catalogue should build: {err}"),
    }
}

proptest! {
    #[test]
    fn test_one_vertex_per_row(catalogue in catalogue_strategy(16)) {
        let graph = build(&catalogue);

        prop_assert_eq!(graph.node_count(), catalogue.names.len());
        let labels: Vec<String> = graph.labels().iter().map(|l| l.to_string()).collect();
        prop_assert_eq!(labels, catalogue.names.clone());
    }

    #[test]
    fn test_edges_match_dependency_lists(catalogue in catalogue_strategy(16)) {
        let graph = build(&catalogue);

        prop_assert_eq!(graph.edges(), catalogue.expected_edges());
        for (course, deps) in catalogue.deps.iter().enumerate() {
            if deps.is_empty() {
                prop_assert!(graph.edges().iter().all(|&(_, to)| to != course));
            }
        }
    }

    #[test]
    fn test_gml_round_trip(catalogue in catalogue_strategy(16)) {
        let graph = build(&catalogue);
        let text = export_to_string(ExportFormat::Gml, &graph).unwrap();
        let document = gml::parse_str(&text).unwrap();
        let imported = CourseGraph::from_gml(&document, SizeRange::default()).unwrap();

        prop_assert_eq!(imported.node_count(), graph.node_count());
        prop_assert_eq!(imported.labels(), graph.labels());
        prop_assert_eq!(imported.sizes(), graph.sizes());

        let mut expected = graph.edges();
        let mut actual = imported.edges();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }
}

//! End-to-end runs of the CSV -> graph -> GML pipeline.

use std::fs;
use std::path::Path;

use coursegraph::config::{DisplayMode, PipelineConfig};
use coursegraph::export::gml;
use coursegraph::graph::{GraphError, GraphOptions, WhitespacePolicy};
use coursegraph::pipeline::{self, PipelineError};

const UMICH_SAMPLE: &str = "\
Course_Name,Dependencies
EECS 183,
EECS 203,
EECS 280,EECS 183
EECS 281,\"EECS 203,EECS 280\"
EECS 370,\"EECS 203,EECS 280\"
EECS 482,\"EECS 281,EECS 370\"
EECS 485,EECS 281
";

fn config_for(dir: &Path, csv: &str) -> PipelineConfig {
    let input = dir.join("course_dependencies.csv");
    fs::write(&input, csv).unwrap();
    PipelineConfig {
        input,
        output: dir.join("umich_courses.gml"),
        image: dir.join("umich_courses.svg"),
        display: DisplayMode::None,
        ..PipelineConfig::default()
    }
}

#[test]
fn test_vertex_count_equals_row_count() {
    let dir = tempfile::tempdir().unwrap();
    let output = pipeline::run(&config_for(dir.path(), UMICH_SAMPLE), false).unwrap();

    assert_eq!(output.graph.node_count(), 7);
    assert_eq!(output.graph.edge_count(), 8);
}

#[test]
fn test_edges_point_from_prerequisite_to_course() {
    let dir = tempfile::tempdir().unwrap();
    let graph = pipeline::run(&config_for(dir.path(), UMICH_SAMPLE), false)
        .unwrap()
        .graph;

    assert_eq!(
        graph.edges(),
        vec![(0, 2), (1, 3), (2, 3), (1, 4), (2, 4), (3, 5), (4, 5), (3, 6)]
    );

    // Rows with an empty Dependencies cell never receive an edge
    for row in [0, 1] {
        assert!(graph.edges().iter().all(|&(_, to)| to != row));
    }
}

#[test]
fn test_gml_round_trip_preserves_graph() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), UMICH_SAMPLE);
    let built = pipeline::run(&config, false).unwrap().graph;

    let parsed = gml::parse_file(&config.output).unwrap();
    assert_eq!(parsed.nodes.len(), built.node_count());

    let labels: Vec<&str> = parsed.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, built.labels());

    let mut expected = built.edges();
    let mut actual = parsed.edges;
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn test_duplicate_dependency_entries_survive_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), "Course_Name,Dependencies\nIntro,\nAdvanced,\"Intro,Intro\"\n");
    pipeline::run(&config, false).unwrap();

    let imported = pipeline::inspect(&config.output).unwrap();
    assert_eq!(imported.edges(), vec![(0, 1), (0, 1)]);
}

#[test]
fn test_equal_dependency_counts_give_equal_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), "Course_Name,Dependencies\nA,B\nB,C\nC,A\n");
    let graph = pipeline::run(&config, false).unwrap().graph;

    let sizes = graph.sizes();
    assert!(sizes.iter().all(|s| s.is_finite()));
    assert!(sizes.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_whitespace_policy() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "Course_Name,Dependencies\nA,\nB,\nC,\"A, B\"\n";

    let strict = config_for(dir.path(), csv);
    let err = pipeline::run(&strict, false).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Graph(GraphError::UnknownDependency { ref dependency, .. }) if dependency == " B"
    ));

    let trimmed = PipelineConfig {
        graph: GraphOptions {
            whitespace: WhitespacePolicy::Trim,
            ..GraphOptions::default()
        },
        ..strict
    };
    let graph = pipeline::run(&trimmed, false).unwrap().graph;
    assert_eq!(graph.edges(), vec![(0, 2), (1, 2)]);
}

#[test]
fn test_svg_display_mode() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        display: DisplayMode::Svg,
        ..config_for(dir.path(), UMICH_SAMPLE)
    };
    pipeline::run(&config, true).unwrap();

    let svg = fs::read_to_string(&config.image).unwrap();
    assert!(svg.contains(">EECS 482</text>"));
    assert_eq!(svg.matches("<line ").count(), 8);
}

#[test]
fn test_json_output_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        output: dir.path().join("courses.json"),
        ..config_for(dir.path(), UMICH_SAMPLE)
    };
    pipeline::run(&config, false).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config.output).unwrap()).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 7);
    assert_eq!(json["edges"].as_array().unwrap().len(), 8);
}

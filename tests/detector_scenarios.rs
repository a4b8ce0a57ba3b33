//! End-to-end detection scenarios over small hand-built graphs.

use cyclemap::{
    detect_circular_dependencies, CycleType, Dependency, DependencyGraphInput, DependencyKind,
    DependencyStrength, DetectionConfig, DetectionError, ModuleInfo, Severity,
};
use pretty_assertions::assert_eq;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dep(
    from: &str,
    to: &str,
    kind: DependencyKind,
    language: &str,
    strength: DependencyStrength,
) -> Dependency {
    Dependency::new(from, to, kind, language, strength)
}

fn strong_import(from: &str, to: &str) -> Dependency {
    dep(from, to, DependencyKind::Import, "rust", DependencyStrength::Strong)
}

#[test]
fn direct_two_node_cycle_is_critical() {
    init_logs();
    let mut input = DependencyGraphInput::new("two-node");
    input.dependencies = vec![strong_import("auth", "db"), strong_import("db", "auth")];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    let cycle = &report.cycles[0];
    assert_eq!(cycle.length, 2);
    assert_eq!(cycle.severity, Severity::Critical);
    assert_eq!(cycle.cycle_type, CycleType::Direct);
    assert!((cycle.weight - 6.0).abs() < 1e-9);
    assert!((cycle.metrics.average_weight - 3.0).abs() < 1e-9);
    assert!((cycle.metrics.complexity - 2.0).abs() < 1e-9);
    assert!(cycle.id.starts_with("cycle_"));
    assert_eq!(cycle.id.len(), "cycle_".len() + 12);
    assert_eq!(cycle.description, "Direct cycle of length 2: auth → db → auth");
}

#[test]
fn three_node_require_cycle_is_high_severity() {
    init_logs();
    let mut input = DependencyGraphInput::new("three-node");
    input.dependencies = vec![
        dep("c", "d", DependencyKind::Require, "javascript", DependencyStrength::Weak),
        dep("d", "e", DependencyKind::Require, "javascript", DependencyStrength::Strong),
        dep("e", "c", DependencyKind::Require, "javascript", DependencyStrength::Strong),
    ];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    let cycle = &report.cycles[0];
    assert_eq!(cycle.severity, Severity::High);
    assert_eq!(cycle.cycle_type, CycleType::Indirect);
    // weak require 1.2 plus two strong requires at 3.6 each
    assert!((cycle.weight - 8.4).abs() < 1e-9);
    assert_eq!(cycle.metrics.strong_edges, 2);
    assert_eq!(cycle.metrics.weak_edges, 1);
}

#[test]
fn self_loop_is_a_degenerate_direct_cycle() {
    init_logs();
    let mut input = DependencyGraphInput::new("self-loop");
    input.dependencies = vec![strong_import("solo", "solo")];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    assert_eq!(report.cycles[0].length, 1);
    assert_eq!(report.cycles[0].severity, Severity::Critical);
    assert_eq!(report.cycles[0].cycle_type, CycleType::Direct);
}

#[test]
fn external_edges_are_dropped_unless_requested() {
    init_logs();
    let mut input = DependencyGraphInput::new("external");
    input.dependencies = vec![
        strong_import("app", "vendored"),
        strong_import("vendored", "app").external(),
    ];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();
    assert_eq!(report.summary.total_cycles, 0);

    let mut config = DetectionConfig::default();
    config.include_external = true;
    let report = detect_circular_dependencies(&input, config).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    let external_edge = report.cycles[0]
        .edges
        .iter()
        .find(|edge| edge.from == "vendored")
        .unwrap();
    // external locality halves the weight
    assert!((external_edge.weight - 1.5).abs() < 1e-9);
}

#[test]
fn cross_language_cycle_is_floored_at_medium() {
    init_logs();
    let mut input = DependencyGraphInput::new("polyglot");
    let nodes = ["m1", "m2", "m3", "m4", "m5", "m6"];
    input.dependencies = (0..6)
        .map(|i| {
            let language = if i % 2 == 0 { "go" } else { "python" };
            dep(
                nodes[i],
                nodes[(i + 1) % 6],
                DependencyKind::Import,
                language,
                DependencyStrength::Strong,
            )
        })
        .collect();

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    let cycle = &report.cycles[0];
    // length 6 alone would be low severity
    assert_eq!(cycle.severity, Severity::Medium);
    assert_eq!(cycle.cycle_type, CycleType::CrossLanguage);
    assert_eq!(cycle.languages, vec!["go", "python"]);
    assert!(cycle.metrics.cross_language_edges > 0);
}

#[test]
fn module_mapping_overrides_edge_language_tags() {
    init_logs();
    let mut input = DependencyGraphInput::new("mapped");
    input.dependencies = vec![strong_import("svc", "lib"), strong_import("lib", "svc")];
    input
        .modules
        .insert("svc".to_string(), ModuleInfo::new("services/svc", "go"));
    input
        .modules
        .insert("lib".to_string(), ModuleInfo::new("shared/lib", "python"));

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    let cycle = &report.cycles[0];
    assert_eq!(cycle.cycle_type, CycleType::CrossLanguage);
    assert_eq!(cycle.languages, vec!["go", "python"]);
}

#[test]
fn parallel_edges_collapse_into_one_cycle() {
    init_logs();
    let mut input = DependencyGraphInput::new("parallel");
    input.dependencies = vec![
        strong_import("a", "b"),
        dep("a", "b", DependencyKind::Require, "rust", DependencyStrength::Weak),
        strong_import("b", "a"),
    ];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    // the first-listed parallel edge is the representative
    assert_eq!(report.cycles[0].metrics.strong_edges, 2);
    assert_eq!(report.cycles[0].metrics.weak_edges, 0);
}

#[test]
fn long_cycles_are_dropped_by_max_length() {
    init_logs();
    let mut input = DependencyGraphInput::new("long");
    let nodes = ["n1", "n2", "n3", "n4", "n5"];
    input.dependencies = (0..5)
        .map(|i| strong_import(nodes[i], nodes[(i + 1) % 5]))
        .collect();

    let mut config = DetectionConfig::default();
    config.max_cycle_length = 4;

    let report = detect_circular_dependencies(&input, config).unwrap();
    assert_eq!(report.summary.total_cycles, 0);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("No circular dependencies")));
}

#[test]
fn min_severity_filters_cycles_and_their_advice() {
    init_logs();
    let mut input = DependencyGraphInput::new("mixed");
    // a two-node critical cycle and a four-node medium one
    input.dependencies = vec![
        strong_import("a", "b"),
        strong_import("b", "a"),
        strong_import("w", "x"),
        strong_import("x", "y"),
        strong_import("y", "z"),
        strong_import("z", "w"),
    ];

    let mut config = DetectionConfig::default();
    config.min_severity_level = Severity::High;

    let report = detect_circular_dependencies(&input, config).unwrap();

    assert_eq!(report.summary.total_cycles, 1);
    assert_eq!(report.cycles[0].severity, Severity::Critical);
    assert_eq!(report.breaking_strategies.len(), 1);
    assert!(report.breaking_strategies.contains_key(&report.cycles[0].id));
}

#[test]
fn acyclic_graph_reports_clean_architecture() {
    init_logs();
    let mut input = DependencyGraphInput::new("acyclic");
    input.dependencies = vec![
        strong_import("api", "service"),
        strong_import("service", "store"),
        strong_import("api", "store"),
    ];

    let report = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    assert_eq!(report.summary.total_cycles, 0);
    assert_eq!(report.impact_analysis.system_complexity, 0.0);
    assert_eq!(report.impact_analysis.testability_score, 10.0);
    assert_eq!(report.impact_analysis.maintainability_score, 10.0);
    assert!(report.impact_analysis.critical_paths.is_empty());
    assert_eq!(
        report.recommendations,
        vec!["✅ No circular dependencies detected - excellent architecture!"]
    );
}

#[test]
fn fully_filtered_graph_is_rejected() {
    init_logs();
    let mut input = DependencyGraphInput::new("all-external");
    input.dependencies = vec![
        strong_import("a", "b").external(),
        strong_import("b", "a").external(),
    ];

    let err = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DetectionError::EmptyGraph {
            supplied: 2,
            dropped: 2
        }
    ));
    let message = err.to_string();
    assert!(message.contains("2 of 2"));
}

#[test]
fn reports_are_reproducible_modulo_timestamp() {
    init_logs();
    let mut input = DependencyGraphInput::new("repro");
    input.dependencies = vec![
        strong_import("a", "b"),
        strong_import("b", "c"),
        strong_import("c", "a"),
        strong_import("b", "a"),
        dep("c", "b", DependencyKind::Require, "go", DependencyStrength::Weak),
    ];

    let first = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();
    let second = detect_circular_dependencies(&input, DetectionConfig::default()).unwrap();

    let mut first_json = serde_json::to_value(&first).unwrap();
    let mut second_json = serde_json::to_value(&second).unwrap();
    first_json.as_object_mut().unwrap().remove("generated_at");
    second_json.as_object_mut().unwrap().remove("generated_at");

    assert_eq!(first_json, second_json);
}

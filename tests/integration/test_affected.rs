//! End-to-end impact analysis against the in-memory build graph

use crate::helpers::{StaticDiff, classifier, scenario_graph, unit_labels};
use shipyard::impact::detect::ImpactAnalyzer;
use shipyard::impact::unit::UnitKind;

#[test]
fn test_source_change_in_shared_package_affects_dependents_only() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();
  let labels = unit_labels(&units);

  // alpha depends on shared, so does its chart
  assert!(labels.contains(&"//apps/alpha/api:app_metadata".to_string()));
  assert!(labels.contains(&"//charts/alpha:chart_metadata".to_string()));
  // beta has no dependency on shared
  assert!(!labels.contains(&"//apps/beta/worker:app_metadata".to_string()));
  // tools lives under shared's subtree, but a source edit stays in its own package
  assert!(!labels.contains(&"//shared/lib/tools:app_metadata".to_string()));
  assert_eq!(units.len(), 2);
}

#[test]
fn test_definition_change_invalidates_whole_subtree() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/BUILD.bazel"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();
  let labels = unit_labels(&units);

  // A definition edit reaches every target declared under shared/lib,
  // including the tools unit in a nested package
  assert!(labels.contains(&"//apps/alpha/api:app_metadata".to_string()));
  assert!(labels.contains(&"//shared/lib/tools:app_metadata".to_string()));
  assert!(!labels.contains(&"//apps/beta/worker:app_metadata".to_string()));
}

#[test]
fn test_kind_filter_narrows_to_charts() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer
    .detect_affected(Some("origin/main"), Some(UnitKind::Chart))
    .unwrap();

  assert_eq!(unit_labels(&units), vec!["//charts/alpha:chart_metadata".to_string()]);
}

#[test]
fn test_kind_filter_narrows_to_apps() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer
    .detect_affected(Some("origin/main"), Some(UnitKind::App))
    .unwrap();

  assert_eq!(unit_labels(&units), vec!["//apps/alpha/api:app_metadata".to_string()]);
}

#[test]
fn test_no_base_ref_returns_full_listing() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&[]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(None, None).unwrap();
  assert_eq!(
    unit_labels(&units),
    vec![
      "//apps/alpha/api:app_metadata".to_string(),
      "//apps/beta/worker:app_metadata".to_string(),
      "//shared/lib/tools:app_metadata".to_string(),
      "//charts/alpha:chart_metadata".to_string(),
    ]
  );

  let apps = analyzer.detect_affected(None, Some(UnitKind::App)).unwrap();
  assert_eq!(apps.len(), 3);
}

#[test]
fn test_empty_diff_returns_nothing_without_queries() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&[]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();
  assert!(units.is_empty());
  assert_eq!(graph.query_count(), 0);
}

#[test]
fn test_ignored_only_changes_return_nothing_without_queries() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["docs/runbook.md", "apps/alpha/api/README.md", ".github/workflows/ci.yaml"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();
  assert!(units.is_empty());
  assert_eq!(graph.query_count(), 0);
}

#[test]
fn test_identical_inputs_yield_identical_ordered_results() {
  let config = classifier();

  let run = || {
    let graph = scenario_graph();
    let diff = StaticDiff::of(&["shared/lib/BUILD.bazel"]);
    let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);
    unit_labels(&analyzer.detect_affected(Some("origin/main"), None).unwrap())
  };

  let first = run();
  let second = run();
  assert_eq!(first, second);

  // Results come back in directory-listing order
  assert_eq!(
    first,
    vec![
      "//apps/alpha/api:app_metadata".to_string(),
      "//shared/lib/tools:app_metadata".to_string(),
      "//charts/alpha:chart_metadata".to_string(),
    ]
  );
}

#[test]
fn test_monotonicity_of_change_sets() {
  let config = classifier();

  let run = |paths: &[&str]| {
    let graph = scenario_graph();
    let diff = StaticDiff::of(paths);
    let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);
    unit_labels(&analyzer.detect_affected(Some("origin/main"), None).unwrap())
  };

  let smaller = run(&["shared/lib/util.go"]);
  let larger = run(&["shared/lib/util.go", "apps/beta/worker/main.go"]);

  for label in &smaller {
    assert!(larger.contains(label), "{} missing from superset result", label);
  }
  assert!(larger.contains(&"//apps/beta/worker:app_metadata".to_string()));
}

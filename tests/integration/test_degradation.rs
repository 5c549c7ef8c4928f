//! Degradation behavior when external collaborators fail
//!
//! Resolution and reachability shrink to conservative results; the unit
//! directory is the one query that must succeed; a broken diff means
//! over-build rather than under-build.

use crate::helpers::{FailingDiff, FakeGraph, StaticDiff, classifier, scenario_graph, unit_labels};
use shipyard::core::error::ShipError;
use shipyard::impact::detect::ImpactAnalyzer;
use shipyard::impact::unit::UnitKind;

#[test]
fn test_failed_definition_batch_degrades_to_partial_resolution() {
  let graph = scenario_graph();
  graph.fail_when("//shared/lib/...");

  let diff = StaticDiff::of(&["shared/lib/BUILD.bazel", "apps/beta/worker/main.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();

  // The subtree batch is lost; the source batch still resolves beta
  assert_eq!(unit_labels(&units), vec!["//apps/beta/worker:app_metadata".to_string()]);
}

#[test]
fn test_failed_reachability_degrades_to_directly_touched_units() {
  let graph = scenario_graph();
  graph.fail_when("rdeps(");

  let diff = StaticDiff::of(&["apps/alpha/api/main.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();

  // alpha's own metadata target sits in the changed package, so it survives
  // the fallback; the chart (reachable only transitively) does not
  assert_eq!(unit_labels(&units), vec!["//apps/alpha/api:app_metadata".to_string()]);
}

#[test]
fn test_failed_kind_filter_falls_back_to_cached_kinds() {
  let graph = scenario_graph();
  graph.fail_when("kind(\"chart_metadata\"");

  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer
    .detect_affected(Some("origin/main"), Some(UnitKind::Chart))
    .unwrap();

  assert_eq!(unit_labels(&units), vec!["//charts/alpha:chart_metadata".to_string()]);
  // The fallback reuses the cached listing instead of re-querying it
  assert_eq!(graph.queries_containing("app_metadata|chart_metadata"), 1);
}

#[test]
fn test_directory_failure_is_fatal() {
  let graph = scenario_graph();
  graph.fail_when("app_metadata|chart_metadata");

  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let err = analyzer.detect_affected(Some("origin/main"), None).unwrap_err();
  assert!(matches!(err, ShipError::Query(_)));
}

#[test]
fn test_diff_failure_returns_full_listing() {
  let graph = scenario_graph();
  let diff = FailingDiff;
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/vanished"), None).unwrap();
  assert_eq!(units.len(), 4);
}

#[test]
fn test_empty_directory_is_normal_terminal_state() {
  // A graph with targets but no metadata units anywhere
  let graph = FakeGraph::new()
    .target("//shared/lib:lib", &[])
    .target("//apps/alpha/api:bin", &["//shared/lib:lib"]);

  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  let units = analyzer.detect_affected(Some("origin/main"), None).unwrap();
  assert!(units.is_empty());
  // Resolution found targets, the directory answered, and the reachability
  // query was skipped because the universe is empty
  assert_eq!(graph.queries_containing("rdeps("), 0);
}

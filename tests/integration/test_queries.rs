//! Query-shape assertions: batching, memoization, universe scoping
//!
//! The engine's scalability rests on the shape of its external calls, not
//! just their results: O(distinct changed packages) resolver batches, one
//! whole-graph listing per invocation, one reachability query scoped to the
//! unit universe.

use crate::helpers::{StaticDiff, classifier, scenario_graph};
use shipyard::impact::detect::ImpactAnalyzer;
use shipyard::impact::unit::UnitKind;

#[test]
fn test_resolver_batches_one_query_per_partition() {
  let graph = scenario_graph();
  // Two definition-changed packages, two source-changed packages, five files
  let diff = StaticDiff::of(&[
    "shared/lib/BUILD.bazel",
    "tools/build/defs.bzl",
    "apps/alpha/api/main.go",
    "apps/alpha/api/handler.go",
    "apps/beta/worker/main.go",
  ]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  analyzer.detect_affected(Some("origin/main"), None).unwrap();

  // definition batch + source batch + directory listing + reachability
  assert_eq!(graph.query_count(), 4);
  assert_eq!(graph.queries_containing("//shared/lib/..."), 1);
  assert_eq!(graph.queries_containing(":*"), 1);
  assert_eq!(graph.queries_containing("rdeps("), 1);
  assert_eq!(graph.queries_containing("app_metadata|chart_metadata"), 1);
}

#[test]
fn test_directory_listing_memoized_across_detections() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  analyzer.detect_affected(Some("origin/main"), None).unwrap();
  analyzer.detect_affected(Some("origin/main"), None).unwrap();

  assert_eq!(graph.queries_containing("app_metadata|chart_metadata"), 1);
}

#[test]
fn test_reachability_query_scoped_to_unit_universe() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  analyzer.detect_affected(Some("origin/main"), None).unwrap();

  let rdeps: Vec<String> = graph.queries().into_iter().filter(|q| q.contains("rdeps(")).collect();
  assert_eq!(rdeps.len(), 1);
  let query = &rdeps[0];

  // Universe is the explicit metadata-label set, never a whole-graph pattern
  assert!(query.starts_with("rdeps(set("), "unexpected query shape: {}", query);
  assert!(!query.contains("//..."), "universe must not be the whole graph: {}", query);
  assert!(query.contains("//apps/beta/worker:app_metadata"));
  assert!(query.contains("//charts/alpha:chart_metadata"));
}

#[test]
fn test_kind_filter_query_restricted_to_input_set() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  analyzer
    .detect_affected(Some("origin/main"), Some(UnitKind::Chart))
    .unwrap();

  let kind_queries: Vec<String> = graph
    .queries()
    .into_iter()
    .filter(|q| q.starts_with("kind(\"chart_metadata\""))
    .collect();
  assert_eq!(kind_queries.len(), 1);
  let query = &kind_queries[0];

  assert!(query.starts_with("kind(\"chart_metadata\", set("), "unexpected query shape: {}", query);
  assert!(!query.contains("//..."), "kind filter must not widen to the whole graph: {}", query);
  // Only reached labels appear in the set, not the untouched beta unit
  assert!(!query.contains("//apps/beta/worker:app_metadata"));
}

#[test]
fn test_no_kind_filter_query_without_kind() {
  let graph = scenario_graph();
  let diff = StaticDiff::of(&["shared/lib/util.go"]);
  let config = classifier();
  let analyzer = ImpactAnalyzer::new(&graph, &diff, &config);

  analyzer.detect_affected(Some("origin/main"), None).unwrap();

  // The only kind() query is the directory listing itself
  assert_eq!(graph.queries_containing("kind("), 1);
}

//! Integration tests for metric-ID aggregation and filtering.

mod common;

use common::{doc_ids, mixed_pings, TestPingBuilder};
use pingview_lib::core::Ping;
use pingview_lib::metrics::{
    aggregate_metric_id_counts, aggregate_metric_ids, aggregate_metric_ids_parallel,
    filter_on_metric_id, parse_ping_payload, payload_contains_metric_id,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[test]
fn test_aggregate_mixed_dump() {
    let pings = mixed_pings();
    assert_eq!(
        aggregate_metric_ids(&pings),
        vec!["glean.clicks", "os", "ui.interaction.click", "a.b.c"]
    );
    assert_eq!(
        aggregate_metric_id_counts(&pings),
        vec![
            ("glean.clicks".to_string(), 3),
            ("os".to_string(), 2),
            ("ui.interaction.click".to_string(), 2),
            ("a.b.c".to_string(), 1),
        ]
    );
}

#[test]
fn test_aggregate_has_no_duplicates() {
    let ids = aggregate_metric_ids(&mixed_pings());
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_aggregate_lists_exactly_the_contained_ids() {
    let pings = mixed_pings();
    let ids = aggregate_metric_ids(&pings);

    // Every listed ID is contained by some ping...
    for id in &ids {
        assert!(
            !filter_on_metric_id(&pings, Some(id.as_str())).is_empty(),
            "{} listed but no ping contains it",
            id
        );
    }

    // ...and a contained ID is never missing
    for candidate in ["glean.clicks", "os", "a.b.c", "ui.interaction.click"] {
        assert!(ids.iter().any(|id| id == candidate));
    }
    assert!(!ids.iter().any(|id| id == "missing"));
}

#[test]
fn test_aggregate_empty() {
    let pings: Vec<Ping> = Vec::new();
    assert!(aggregate_metric_ids(&pings).is_empty());
}

#[test]
fn test_aggregate_two_metric_types_count_twice() {
    let pings = vec![
        TestPingBuilder::new("1").metric("counter", "a").build(),
        TestPingBuilder::new("2")
            .metric("counter", "b")
            .metric("labeled_counter", "b")
            .build(),
    ];
    assert_eq!(aggregate_metric_ids(&pings), vec!["b", "a"]);
}

#[test]
fn test_aggregate_is_deterministic() {
    let pings = mixed_pings();
    let first = aggregate_metric_ids(&pings);
    for _ in 0..10 {
        assert_eq!(aggregate_metric_ids(&pings), first);
    }
    assert_eq!(aggregate_metric_ids_parallel(&pings), first);
}

#[test]
fn test_more_frequent_ids_come_first() {
    let pings = mixed_pings();
    let counts = aggregate_metric_id_counts(&pings);
    for pair in counts.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn test_filter_no_metric_id_returns_input() {
    let pings = mixed_pings();
    assert_eq!(doc_ids(&filter_on_metric_id(&pings, None)), doc_ids(&pings));
    assert_eq!(doc_ids(&filter_on_metric_id(&pings, Some(""))), doc_ids(&pings));
}

#[test]
fn test_filter_metrics_and_events() {
    let pings = mixed_pings();
    assert_eq!(
        doc_ids(&filter_on_metric_id(&pings, Some("glean.clicks"))),
        vec!["p1", "p3", "p6"]
    );
    assert_eq!(
        doc_ids(&filter_on_metric_id(&pings, Some("ui.interaction.click"))),
        vec!["p3", "p4"]
    );
    assert_eq!(doc_ids(&filter_on_metric_id(&pings, Some("a.b.c"))), vec!["p4"]);
    assert!(filter_on_metric_id(&pings, Some("nope")).is_empty());
}

#[test]
fn test_filter_results_contain_the_id() {
    let pings = mixed_pings();
    for id in aggregate_metric_ids(&pings) {
        for ping in filter_on_metric_id(&pings, Some(id.as_str())) {
            let payload = parse_ping_payload(ping).expect("matched ping must parse");
            assert!(payload_contains_metric_id(&payload, &id));
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let pings = mixed_pings();
    for id in ["glean.clicks", "ui.interaction.click", "a.b.c", "missing"] {
        let once: Vec<&Ping> = filter_on_metric_id(&pings, Some(id));
        let twice: Vec<&Ping> = filter_on_metric_id(&once, Some(id))
            .into_iter()
            .copied()
            .collect();
        assert_eq!(doc_ids(&twice), doc_ids(&once));
    }
}

#[test]
fn test_filter_skips_invalid_json() {
    let pings = vec![
        TestPingBuilder::new("1").metric("counter", "x").build(),
        TestPingBuilder::new("2").raw("{\"metrics\":").build(),
        TestPingBuilder::new("3").metric("counter", "y").build(),
    ];
    assert_eq!(doc_ids(&filter_on_metric_id(&pings, Some("x"))), vec!["1"]);
}

#[test]
fn test_not_json_is_excluded_everywhere() {
    let pings = vec![TestPingBuilder::new("1").raw("not json").build()];
    assert!(aggregate_metric_ids(&pings).is_empty());
    assert!(filter_on_metric_id(&pings, Some("anything")).is_empty());
}

#[test]
fn test_raw_payload_strings() {
    let payloads = vec![
        r#"{"metrics":{"counter":{"clicks":1}}}"#.to_string(),
        r#"{"events":[{"category":"ui.interaction","name":"click"}]}"#.to_string(),
    ];
    assert_eq!(aggregate_metric_ids(&payloads), vec!["clicks", "ui.interaction.click"]);
    assert_eq!(filter_on_metric_id(&payloads, Some("ui.interaction.click")).len(), 1);
}

//! Common test utilities and fixtures.

#![allow(dead_code)]

use pingview_lib::core::Ping;
use serde_json::{json, Map, Value};

/// Test fixture builder for creating pings with sensible defaults.
pub struct TestPingBuilder {
    doc_id: String,
    metrics: Map<String, Value>,
    events: Vec<Value>,
    raw_payload: Option<String>,
}

impl TestPingBuilder {
    pub fn new(doc_id: &str) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            metrics: Map::new(),
            events: Vec::new(),
            raw_payload: None,
        }
    }

    /// Record `metric_id` under `metric_type`.
    pub fn metric(mut self, metric_type: &str, metric_id: &str) -> Self {
        let group = self
            .metrics
            .entry(metric_type.to_string())
            .or_insert_with(|| json!({}));
        if let Value::Object(group) = group {
            group.insert(metric_id.to_string(), json!(1));
        }
        self
    }

    /// Record an event with the given category and name.
    pub fn event(mut self, category: &str, name: &str) -> Self {
        self.events
            .push(json!({ "category": category, "name": name, "timestamp": 0 }));
        self
    }

    /// Use `payload` verbatim instead of the generated one.
    pub fn raw(mut self, payload: &str) -> Self {
        self.raw_payload = Some(payload.to_string());
        self
    }

    pub fn build(self) -> Ping {
        let payload = self.raw_payload.unwrap_or_else(|| {
            let mut root = Map::new();
            if !self.metrics.is_empty() {
                root.insert("metrics".to_string(), Value::Object(self.metrics));
            }
            if !self.events.is_empty() {
                root.insert("events".to_string(), Value::Array(self.events));
            }
            Value::Object(root).to_string()
        });

        Ping::with_payload(payload).with_doc_id(self.doc_id)
    }
}

/// Document IDs of `pings`, in order.
pub fn doc_ids<P: std::borrow::Borrow<Ping>>(pings: &[P]) -> Vec<String> {
    pings
        .iter()
        .filter_map(|ping| ping.borrow().doc_id.clone())
        .collect()
}

/// A mixed dump: metrics, events, dotted categories and broken payloads.
pub fn mixed_pings() -> Vec<Ping> {
    vec![
        TestPingBuilder::new("p1")
            .metric("counter", "glean.clicks")
            .metric("string", "os")
            .build(),
        TestPingBuilder::new("p2").raw("not json").build(),
        TestPingBuilder::new("p3")
            .event("ui.interaction", "click")
            .metric("counter", "glean.clicks")
            .build(),
        TestPingBuilder::new("p4")
            .event("a.b", "c")
            .event("ui.interaction", "click")
            .build(),
        TestPingBuilder::new("p5").raw("[]").build(),
        TestPingBuilder::new("p6")
            .metric("counter", "glean.clicks")
            .metric("quantity", "os")
            .build(),
    ]
}

//! Schema-tolerant payload decoding.
//!
//! Only the two sections the metric-ID code cares about are extracted.
//! Sections with an unexpected shape are dropped instead of failing the
//! whole payload; only undecodable JSON or a non-object root is an error.

use crate::core::types::PingRecord;
use crate::core::{EventRecord, MetricsSection, Payload, PingViewError, Result};
use serde_json::{Map, Value};

/// Decode a raw payload string.
pub fn parse_payload(raw: &str) -> Result<Payload> {
    let root = match serde_json::from_str::<Value>(raw)? {
        Value::Object(root) => root,
        other => {
            return Err(PingViewError::invalid_payload(format!(
                "expected a JSON object, got {}",
                value_kind(&other)
            )))
        },
    };

    Ok(Payload {
        metrics: root.get("metrics").and_then(Value::as_object).map(metrics_section),
        events: root.get("events").and_then(Value::as_array).map(|events| {
            events
                .iter()
                .filter_map(Value::as_object)
                .map(event_record)
                .collect()
        }),
    })
}

/// Decode the payload of a ping for metric-ID extraction.
///
/// Failures are logged and reported as `None`; a ping that cannot be decoded
/// contributes no metric IDs.
pub fn parse_ping_payload<P: PingRecord + ?Sized>(ping: &P) -> Option<Payload> {
    let doc_id = ping.doc_id().unwrap_or("<unknown>");

    let Some(raw) = ping.payload() else {
        tracing::warn!(doc_id, "Ping has no payload, skipping");
        return None;
    };

    match parse_payload(raw) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(doc_id, category = e.category(), "Failed to parse ping payload: {}", e);
            None
        },
    }
}

fn metrics_section(metrics: &Map<String, Value>) -> MetricsSection {
    let mut section = MetricsSection::new();
    for (metric_type, group) in metrics {
        // Only object groups carry metric IDs as keys
        if let Some(group) = group.as_object() {
            section.push_group(metric_type.as_str(), group.keys().cloned().collect());
        }
    }
    section
}

fn event_record(event: &Map<String, Value>) -> EventRecord {
    let field = |key: &str| event.get(key).and_then(Value::as_str).map(str::to_owned);
    EventRecord {
        category: field("category"),
        name: field("name"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

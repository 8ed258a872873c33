//! Ping and payload types.
//!
//! A [`Ping`] is one telemetry submission as handed to the viewer. Its
//! `payload` stays an opaque JSON string until the metric-ID code decodes it
//! into a [`Payload`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One telemetry submission.
///
/// Fields the viewer does not know about are kept in `extra` so that a
/// filtered list serializes back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ping {
    /// Document identifier of the submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Ping type (e.g. `metrics`, `baseline`, `events`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_type: Option<String>,
    /// Time the ping was received, as reported by the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
    /// Serialized JSON payload, may be malformed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Whether ingestion reported an error for this ping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    /// Error type reported by ingestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error message reported by ingestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Any other fields present on the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ping {
    /// Create a ping carrying only a payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Set the document identifier
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    /// Mark the ping as failed with the given type and message
    pub fn with_error(mut self, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        self.error = Some(true);
        self.error_type = Some(error_type.into());
        self.error_message = Some(message.into());
        self
    }

    /// True when ingestion flagged this ping as erroneous
    pub fn has_error(&self) -> bool {
        self.error.unwrap_or(false)
    }
}

/// Anything that can hand a raw payload to the metric-ID code.
///
/// Implemented for [`Ping`], for references to it, and for bare payload
/// strings so callers can run the extraction over whatever they hold.
pub trait PingRecord {
    /// Raw serialized payload, if the record has one
    fn payload(&self) -> Option<&str>;

    /// Identifier used in diagnostics
    fn doc_id(&self) -> Option<&str> {
        None
    }
}

impl PingRecord for Ping {
    fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }
}

impl<T: PingRecord + ?Sized> PingRecord for &T {
    fn payload(&self) -> Option<&str> {
        (**self).payload()
    }

    fn doc_id(&self) -> Option<&str> {
        (**self).doc_id()
    }
}

impl PingRecord for str {
    fn payload(&self) -> Option<&str> {
        Some(self)
    }
}

impl PingRecord for String {
    fn payload(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Decoded ping payload. Both sections are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// Identifiers found under `metrics`, grouped by metric type
    pub metrics: Option<MetricsSection>,
    /// Records found under `events`
    pub events: Option<Vec<EventRecord>>,
}

impl Payload {
    /// Events, or an empty slice when the section is missing
    pub fn events(&self) -> &[EventRecord] {
        self.events.as_deref().unwrap_or_default()
    }
}

/// The `metrics` section: metric type to the identifiers recorded under it,
/// in payload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSection {
    groups: Vec<(String, Vec<String>)>,
}

impl MetricsSection {
    /// Create an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric type group
    pub fn push_group(&mut self, metric_type: impl Into<String>, metric_ids: Vec<String>) {
        self.groups.push((metric_type.into(), metric_ids));
    }

    /// Metric type groups in payload order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(metric_type, ids)| (metric_type.as_str(), ids.as_slice()))
    }

    /// Every identifier across all groups, duplicates included
    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
    }

    /// True if any group records `metric_id`
    pub fn contains(&self, metric_id: &str) -> bool {
        self.metric_ids().any(|id| id == metric_id)
    }

    /// Number of metric type groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no metric type groups are present
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One entry of the `events` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    /// Event category, may itself contain periods
    pub category: Option<String>,
    /// Event name, never contains periods
    pub name: Option<String>,
}

impl EventRecord {
    /// Create a record with both fields present
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            name: Some(name.into()),
        }
    }

    /// Effective metric identifier, `category.name`.
    ///
    /// A missing field renders as an empty string, so a record without a
    /// category yields `.name`.
    pub fn metric_id(&self) -> String {
        format!(
            "{}.{}",
            self.category.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default()
        )
    }

    /// Category and name when both are present and non-empty
    pub fn parts(&self) -> Option<(&str, &str)> {
        match (self.category.as_deref(), self.name.as_deref()) {
            (Some(category), Some(name)) if !category.is_empty() && !name.is_empty() => {
                Some((category, name))
            },
            _ => None,
        }
    }
}

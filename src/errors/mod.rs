//! Human-readable descriptions of ingestion errors attached to pings.
//!
//! Known failures are recognized through an [`ErrorCatalog`] loaded from
//! configuration: messages are matched by prefix, error types by equality.

use crate::core::Ping;
use serde::{Deserialize, Serialize};

/// A known error message, recognized by its prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonError {
    /// Start of the error message
    pub prefix: String,
    /// Short label prepended to the error text
    pub label: String,
    /// Explanation shown as tooltip
    pub tooltip: String,
}

/// A known error type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonErrorType {
    /// Exact error type reported by ingestion
    pub error_type: String,
    /// Explanation shown above the raw message
    pub tooltip: String,
}

/// Lookup tables for known errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCatalog {
    /// Known messages, first match wins
    pub common_errors: Vec<CommonError>,
    /// Known error types, first match wins
    pub common_error_types: Vec<CommonErrorType>,
}

impl ErrorCatalog {
    /// True if the catalog knows no errors
    pub fn is_empty(&self) -> bool {
        self.common_errors.is_empty() && self.common_error_types.is_empty()
    }

    fn match_message(&self, message: &str) -> Option<&CommonError> {
        self.common_errors
            .iter()
            .find(|entry| message.starts_with(entry.prefix.as_str()))
    }

    fn match_type(&self, error_type: &str) -> Option<&CommonErrorType> {
        self.common_error_types
            .iter()
            .find(|entry| entry.error_type == error_type)
    }
}

/// Display text and optional tooltip for a failed ping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescription {
    /// Error text for the table cell
    pub text: String,
    /// Additional explanation, if the error is known
    pub tooltip: Option<String>,
}

/// Describe the error attached to `ping`, or `None` if it has none.
pub fn describe_error(ping: &Ping, catalog: &ErrorCatalog) -> Option<ErrorDescription> {
    if !ping.has_error() {
        return None;
    }

    let error_type = ping.error_type.as_deref().unwrap_or_default();
    let message = ping.error_message.as_deref().unwrap_or_default();

    let mut text = format!("{} {}", error_type, message);
    let mut tooltip = None;

    if let Some(known) = catalog.match_message(message) {
        text = format!("{}: {}", known.label, text);
        tooltip = Some(known.tooltip.clone());
    }

    // Type explanations take precedence over message tooltips
    if let Some(known) = catalog.match_type(error_type) {
        tooltip = Some(format!("{}\n\n{}", known.tooltip, message));
    }

    Some(ErrorDescription {
        text: loosen_compact_json(&text),
        tooltip,
    })
}

/// Add a space after `:` and `,` between JSON strings so long compact
/// payload excerpts can wrap.
fn loosen_compact_json(text: &str) -> String {
    text.replace("\":\"", "\": \"").replace("\",\"", "\", \"")
}

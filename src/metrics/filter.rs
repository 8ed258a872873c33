//! Filtering pings by the metric IDs their payload contains.

use crate::core::types::PingRecord;
use crate::core::Payload;
use crate::metrics::payload::parse_ping_payload;

/// Keep the pings whose payload contains `metric_id`, in input order.
///
/// A missing or empty `metric_id` means no filter is selected and every
/// ping is returned. A ping matches when the ID is a key of any `metrics`
/// group, or when an event's category and name equal the ID split at its
/// final period. Pings whose payload cannot be decoded never match.
pub fn filter_on_metric_id<'a, P: PingRecord>(
    pings: &'a [P],
    metric_id: Option<&str>,
) -> Vec<&'a P> {
    let metric_id = match metric_id {
        Some(id) if !id.is_empty() => id,
        _ => return pings.iter().collect(),
    };

    let matched: Vec<&P> = pings
        .iter()
        .filter(|ping| {
            parse_ping_payload(*ping)
                .map_or(false, |payload| payload_contains_metric_id(&payload, metric_id))
        })
        .collect();

    tracing::debug!(metric_id, total = pings.len(), matched = matched.len(), "Filtered pings");
    matched
}

/// True if `payload` records `metric_id` in its metrics or its events.
pub fn payload_contains_metric_id(payload: &Payload, metric_id: &str) -> bool {
    let in_metrics = payload
        .metrics
        .as_ref()
        .map_or(false, |metrics| metrics.contains(metric_id));
    if in_metrics {
        return true;
    }

    let (category, name) = split_event_metric_id(metric_id);
    payload
        .events()
        .iter()
        .filter_map(|event| event.parts())
        .any(|parts| parts == (category, name))
}

/// Split an event metric ID into `(category, name)`.
///
/// The name is everything after the final period; categories may contain
/// periods. An ID without a period has an empty category.
pub fn split_event_metric_id(metric_id: &str) -> (&str, &str) {
    metric_id.rsplit_once('.').unwrap_or(("", metric_id))
}

//! Metric-ID aggregation across a set of pings.
//!
//! Every ping contributes the keys of each `metrics` group and the
//! `category.name` of each event. The result ranks IDs by how often they
//! were seen, ties in first-seen order.

use crate::core::types::PingRecord;
use crate::metrics::counting::{keys_by_descending_value, CountingMap};
use crate::metrics::payload::parse_ping_payload;
use rayon::prelude::*;

/// Distinct metric IDs across `pings`, most frequent first.
pub fn aggregate_metric_ids<P: PingRecord>(pings: &[P]) -> Vec<String> {
    // Nothing to parse
    if pings.is_empty() {
        return Vec::new();
    }

    keys_by_descending_value(&count_metric_ids(pings))
}

/// Same ordering as [`aggregate_metric_ids`], with occurrence counts.
pub fn aggregate_metric_id_counts<P: PingRecord>(pings: &[P]) -> Vec<(String, u64)> {
    if pings.is_empty() {
        return Vec::new();
    }

    count_metric_ids(pings).ranked()
}

/// Parallel variant of [`aggregate_metric_ids`] for large ping dumps.
///
/// Produces exactly the same list as the sequential version.
pub fn aggregate_metric_ids_parallel<P: PingRecord + Sync>(pings: &[P]) -> Vec<String> {
    if pings.is_empty() {
        return Vec::new();
    }

    let counts = pings
        .par_iter()
        .fold(CountingMap::new, |mut counts, ping| {
            tally_ping(&mut counts, ping);
            counts
        })
        .reduce(CountingMap::new, |mut left, right| {
            left.merge(right);
            left
        });

    tracing::debug!(
        pings = pings.len(),
        metric_ids = counts.len(),
        "Aggregated metric IDs in parallel"
    );

    keys_by_descending_value(&counts)
}

/// Count every metric ID occurrence across `pings`.
pub fn count_metric_ids<P: PingRecord>(pings: &[P]) -> CountingMap {
    let mut counts = CountingMap::new();
    for ping in pings {
        tally_ping(&mut counts, ping);
    }

    tracing::debug!(pings = pings.len(), metric_ids = counts.len(), "Aggregated metric IDs");
    counts
}

fn tally_ping<P: PingRecord + ?Sized>(counts: &mut CountingMap, ping: &P) {
    let Some(payload) = parse_ping_payload(ping) else {
        return;
    };

    if let Some(metrics) = &payload.metrics {
        for metric_id in metrics.metric_ids() {
            counts.increment(metric_id);
        }
    }

    for event in payload.events() {
        counts.increment(&event.metric_id());
    }
}

//! Metric-ID extraction, aggregation and filtering.
//!
//! Metric IDs come from two places in a ping payload:
//! - the keys under each metric type in `metrics`
//! - `category.name` of every record in `events`
//!
//! Everything here is pure and stateless apart from diagnostic logging.

pub mod aggregator;
pub mod counting;
pub mod filter;
pub mod payload;

pub use aggregator::{
    aggregate_metric_id_counts, aggregate_metric_ids, aggregate_metric_ids_parallel,
    count_metric_ids,
};
pub use counting::{insert_or_increment, keys_by_descending_value, CountingMap};
pub use filter::{filter_on_metric_id, payload_contains_metric_id, split_event_metric_id};
pub use payload::{parse_payload, parse_ping_payload};

//! pingview - terminal-native telemetry ping inspector.
//!
//! pingview loads a dump of telemetry pings and answers two questions about
//! it: which metric IDs do these pings carry, and which pings carry a given
//! metric ID.
//!
//! # Features
//!
//! - **Metric-ID aggregation**: IDs from `metrics` groups and `events`
//!   records, ranked by how often they occur
//! - **Metric-ID filtering**: keep only the pings recording a given ID
//! - **Error descriptions**: readable text for ingestion errors, annotated
//!   from a configurable catalog of known failures
//! - **Best-effort parsing**: a corrupt payload is logged and skipped, never
//!   aborts the run
//!
//! # Architecture
//!
//! - `core`: ping and payload types, configuration, errors
//! - `metrics`: payload decoding, counting, aggregation and filtering
//! - `errors`: error cell text and tooltip lookup
//! - `cli`: command-line interface
//!
//! # Example
//!
//! ```
//! use pingview_lib::core::Ping;
//! use pingview_lib::metrics::{aggregate_metric_ids, filter_on_metric_id};
//!
//! let pings = vec![
//!     Ping::with_payload(r#"{"metrics":{"counter":{"clicks":1}}}"#),
//!     Ping::with_payload(r#"{"events":[{"category":"ui.nav","name":"back"}]}"#),
//! ];
//!
//! assert_eq!(aggregate_metric_ids(&pings), vec!["clicks", "ui.nav.back"]);
//! assert_eq!(filter_on_metric_id(&pings, Some("ui.nav.back")).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod core;
pub mod errors;
pub mod metrics;

// Re-export core types for convenience
pub use crate::core::{Config, Ping, Result};

//! Core domain models for pingview.
//!
//! This module contains the ping and payload types, configuration and the
//! error type shared by the rest of the crate.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder};
pub use error::{PingViewError, Result};
pub use types::{EventRecord, MetricsSection, Payload, Ping, PingRecord};

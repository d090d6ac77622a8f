//! Error types for chart construction and configuration.
//!
//! The streaming core itself is total over its documented inputs; the only
//! failure modes are rejected at construction or config-load time.

use thiserror::Error;

/// Errors produced when building or configuring a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A sample store cannot have capacity zero. Rejected at construction so
    /// it never surfaces later as an always-empty store.
    #[error("sample buffer capacity must be at least 1")]
    InvalidCapacity,

    /// A configuration file failed validation.
    #[error("invalid chart config: {0}")]
    InvalidConfig(String),
}

//! Labelgate Telemetry
//!
//! Metrics for active learners.
//!
//! Provides:
//! - Per-learner counters for seen, forwarded, acquired and skipped examples
//! - Snapshots with derived labeling rates
//! - Emission through the `metrics` facade for any installed recorder
//!
//! Applications that install a recorder should call [`describe_metrics`]
//! once at startup so every counter carries its description.

pub mod acquisition;

pub use acquisition::{describe_metrics, LearnerMetrics, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::acquisition::{LearnerMetrics, MetricsSnapshot};
}

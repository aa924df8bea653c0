//! Observability for the todo service
//!
//! - Structured logging through `tracing`, installed by [`init_logging`]
//! - Monotonic operation counters in [`MetricsRegistry`]
//!
//! Observability never affects request outcomes: a subscriber that fails to
//! install is reported and ignored.

mod logging;
mod metrics;

pub use logging::{init_logging, DEFAULT_LOG_FILTER};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

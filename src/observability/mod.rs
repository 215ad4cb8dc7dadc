//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! simulator/ and lifecycle/ produce:
//!     → logging.rs (structured events keyed by request_id)
//!     → metrics.rs (request / outcome counters)
//! ```
//!
//! # Design Decisions
//! - Events carry the request ID so interleaved threads stay readable
//! - Metrics are cheap and off the delivery path's critical section

pub mod logging;
pub mod metrics;

use crate::config::SimulatorConfig;

/// Apply the observability part of a configuration.
pub fn init(config: &SimulatorConfig) {
    metrics::set_enabled(config.metrics_enabled);
    if !logging::init_logging(&config.log_level) {
        tracing::debug!("Logging already initialized");
    }
}

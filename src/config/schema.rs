//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Artificial latency before the `pre` signal fires, in milliseconds.
    pub latency_ms: u64,

    /// Prefix for background thread names (`<prefix>-send-<id>`).
    pub thread_name_prefix: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record `netmock_*` counters.
    pub metrics_enabled: bool,
}

impl SimulatorConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub(crate) fn thread_name(&self, role: &str, id: impl std::fmt::Display) -> String {
        format!("{}-{}-{}", self.thread_name_prefix, role, id)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            thread_name_prefix: "netmock".to_string(),
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

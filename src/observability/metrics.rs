//! Simulator counters.
//!
//! # Metrics
//! - `netmock_requests_total` (counter): sends started, by `path` (controlled/scripted)
//! - `netmock_completions_total` (counter): final deliveries, by `outcome`
//!   (completed/cancelled/suppressed)
//! - `netmock_cancel_noop_total` (counter): cancels that lost the race
//! - `netmock_spawn_failures_total` (counter): background threads the OS refused
//!
//! No recorder is installed here; the embedding test binary decides where
//! metrics go. Without a recorder every call is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Final delivery kind of a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    /// Natural completion that lost the race to a cancel.
    Suppressed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Completed => "completed",
            Outcome::Cancelled => "cancelled",
            Outcome::Suppressed => "suppressed",
        }
    }
}

pub fn record_request(path: &'static str) {
    if is_enabled() {
        ::metrics::counter!("netmock_requests_total", "path" => path).increment(1);
    }
}

pub fn record_outcome(outcome: Outcome) {
    if is_enabled() {
        ::metrics::counter!("netmock_completions_total", "outcome" => outcome.as_str()).increment(1);
    }
}

pub fn record_cancel_noop() {
    if is_enabled() {
        ::metrics::counter!("netmock_cancel_noop_total").increment(1);
    }
}

pub fn record_spawn_failure() {
    if is_enabled() {
        ::metrics::counter!("netmock_spawn_failures_total").increment(1);
    }
}

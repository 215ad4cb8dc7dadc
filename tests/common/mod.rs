//! Shared utilities for simulator integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use netmock::http::{Callback, DataCallback, HeaderCallback, Network, NetworkRequest, NetworkResponse, Payload};
use netmock::lifecycle::{signal, Signal, SignalWaiter};
use netmock::{SendOutcome, SimulatorConfig};

/// Generous bound for anything a test waits on; a hang fails instead of stalling CI.
pub const WAIT: Duration = Duration::from_secs(5);

/// Simulator settings with negligible latency.
pub fn fast_config() -> SimulatorConfig {
    let config = SimulatorConfig {
        latency_ms: 5,
        log_level: "debug".into(),
        ..SimulatorConfig::default()
    };
    netmock::observability::init(&config);
    config
}

/// Everything a client observed for one request.
#[derive(Debug, Default)]
pub struct Observed {
    pub responses: Vec<NetworkResponse>,
    pub headers: Vec<(String, String)>,
    /// `(bytes, offset, length)` per data callback invocation.
    pub chunks: Vec<(Vec<u8>, u64, usize)>,
}

/// Minimal stand-in for a client under test: records every callback and
/// signals when the completion callback has fired.
#[derive(Clone)]
pub struct RecordingClient {
    observed: Arc<Mutex<Observed>>,
    done: Arc<Mutex<Option<Signal>>>,
}

impl RecordingClient {
    pub fn new() -> (Self, SignalWaiter) {
        let (done_tx, done_rx) = signal("completion");
        (
            Self {
                observed: Arc::new(Mutex::new(Observed::default())),
                done: Arc::new(Mutex::new(Some(done_tx))),
            },
            done_rx,
        )
    }

    pub fn callback(&self) -> Callback {
        let observed = self.observed.clone();
        let done = self.done.clone();
        Arc::new(move |response: NetworkResponse| {
            observed.lock().unwrap().responses.push(response);
            if let Some(done) = done.lock().unwrap().take() {
                done.fire();
            }
        })
    }

    pub fn header_callback(&self) -> HeaderCallback {
        let observed = self.observed.clone();
        Arc::new(move |name: &str, value: &str| {
            observed.lock().unwrap().headers.push((name.to_string(), value.to_string()));
        })
    }

    pub fn data_callback(&self) -> DataCallback {
        let observed = self.observed.clone();
        Arc::new(move |bytes: &[u8], offset: u64, len: usize| {
            observed.lock().unwrap().chunks.push((bytes.to_vec(), offset, len));
        })
    }

    /// Issue a request through `network` with header and data callbacks.
    pub fn send(&self, network: &dyn Network, url: &str) -> SendOutcome {
        network.send(
            NetworkRequest::new(url),
            None,
            self.callback(),
            self.header_callback(),
            Some(self.data_callback()),
        )
    }

    /// Issue a request whose body goes into `payload`.
    pub fn send_into(&self, network: &dyn Network, url: &str, payload: Payload) -> SendOutcome {
        network.send(
            NetworkRequest::new(url),
            Some(payload),
            self.callback(),
            self.header_callback(),
            None,
        )
    }

    /// Issue a request with neither a payload nor a data callback.
    pub fn send_without_body_sink(&self, network: &dyn Network, url: &str) -> SendOutcome {
        network.send(NetworkRequest::new(url), None, self.callback(), self.header_callback(), None)
    }

    pub fn with_observed<R>(&self, f: impl FnOnce(&Observed) -> R) -> R {
        f(&self.observed.lock().unwrap())
    }
}

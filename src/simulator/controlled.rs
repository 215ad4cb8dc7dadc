//! Controlled request simulator.
//!
//! Lets a test decide exactly when a request is in flight, so a cancel can
//! be placed before or after natural completion on purpose.
//!
//! # Responsibilities
//! - Assign the request ID up front
//! - Run the simulated network on a detached thread gated by the release signal
//! - Guarantee exactly one of {completion, cancellation} reaches the callback
//!
//! # Design Decisions
//! - The completion flag is claimed with a single atomic swap; whoever flips
//!   it delivers, the other side stays silent
//! - Body and headers are delivered only after the claim, so a cancelled
//!   request never sees partial data
//! - `post` fires on every path so a test can always wait for teardown
//! - A cancel that wins before `send` has stored a callback leaves delivery
//!   to the network thread, which still owns the send's callback

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;

use crate::config::SimulatorConfig;
use crate::http::{
    lock_payload, Callback, DataCallback, HeaderCallback, Headers, NetworkRequest, NetworkResponse, Payload,
    RequestId, SendOutcome,
};
use crate::lifecycle::{spawn_detached, NetworkSignals};
use crate::observability::metrics::{self, Outcome};
use crate::simulator::{cancelled_response, CancelAction, SendAction};

/// What a controlled request delivers when it is not cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockedResponse {
    pub status: i32,
    pub body: Vec<u8>,
    pub headers: Headers,
}

impl MockedResponse {
    pub fn new(status: i32) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// The ID, send and cancel behaviors of one controlled request.
pub struct MockedActions {
    pub request_id: RequestId,
    pub send: SendAction,
    pub cancel: CancelAction,
}

impl MockedActions {
    pub fn into_parts(self) -> (RequestId, SendAction, CancelAction) {
        (self.request_id, self.send, self.cancel)
    }
}

impl std::fmt::Debug for MockedActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockedActions")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// State shared by the send and cancel paths of one request.
struct RequestSlot {
    id: RequestId,
    completed: AtomicBool,
    /// Set once a cancellation response has gone out.
    cancel_delivered: AtomicBool,
    callback: OnceLock<Callback>,
}

impl RequestSlot {
    fn new(id: RequestId) -> Self {
        Self {
            id,
            completed: AtomicBool::new(false),
            cancel_delivered: AtomicBool::new(false),
            callback: OnceLock::new(),
        }
    }

    /// Returns true for exactly one caller over the slot's lifetime.
    fn try_claim(&self) -> bool {
        !self.completed.swap(true, Ordering::AcqRel)
    }

    /// Deliver the cancellation through the stored callback, at most once.
    ///
    /// Returns false when no callback is stored yet or another caller
    /// already delivered it.
    fn deliver_cancellation(&self, id: RequestId) -> bool {
        let Some(callback) = self.callback.get() else {
            return false;
        };
        if self.cancel_delivered.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::debug!(request_id = %id, outcome = "cancelled", "Delivering cancellation");
        callback(cancelled_response(id));
        metrics::record_outcome(Outcome::Cancelled);
        true
    }
}

/// Build a controlled request with the default configuration.
pub fn controlled_request(signals: NetworkSignals, response: MockedResponse) -> MockedActions {
    controlled_request_with_config(signals, response, &SimulatorConfig::default())
}

pub fn controlled_request_with_config(
    signals: NetworkSignals,
    response: MockedResponse,
    config: &SimulatorConfig,
) -> MockedActions {
    let slot = Arc::new(RequestSlot::new(RequestId::next()));
    let request_id = slot.id;

    let send_slot = slot.clone();
    let send_config = config.clone();
    let send: SendAction = Box::new(
        move |_request: NetworkRequest,
              payload: Option<Payload>,
              callback: Callback,
              header_callback: HeaderCallback,
              data_callback: Option<DataCallback>| {
            let slot = send_slot;
            // Only this send ever populates the holder; a cancel reads it.
            let _ = slot.callback.set(callback.clone());
            metrics::record_request("controlled");
            tracing::debug!(request_id = %slot.id, "Controlled request sent");

            let block = NetworkBlock {
                slot: slot.clone(),
                signals,
                response,
                latency: send_config.latency(),
                payload,
                callback,
                header_callback,
                data_callback,
            };
            spawn_detached(send_config.thread_name("send", slot.id), move || block.run());

            SendOutcome::ok(slot.id)
        },
    );

    let cancel_config = config.clone();
    let cancel: CancelAction = Arc::new(move |id: RequestId| {
        if !slot.try_claim() {
            tracing::debug!(request_id = %id, "Cancel after completion ignored");
            metrics::record_cancel_noop();
            return;
        }
        if id != slot.id {
            tracing::warn!(request_id = %slot.id, cancel_id = %id, "Cancel issued with a foreign request ID");
        }

        let task_slot = slot.clone();
        let spawned = spawn_detached(cancel_config.thread_name("cancel", id), move || {
            if !task_slot.deliver_cancellation(id) {
                tracing::debug!(request_id = %id, "Cancelled before send; network thread will notify");
            }
        });
        // The flag is already claimed, so the cancellation must still go out.
        if !spawned && !slot.deliver_cancellation(id) {
            tracing::debug!(request_id = %id, "Cancelled before send; network thread will notify");
        }
    });

    MockedActions {
        request_id,
        send,
        cancel,
    }
}

/// Everything the background thread of one send owns.
struct NetworkBlock {
    slot: Arc<RequestSlot>,
    signals: NetworkSignals,
    response: MockedResponse,
    latency: std::time::Duration,
    payload: Option<Payload>,
    callback: Callback,
    header_callback: HeaderCallback,
    data_callback: Option<DataCallback>,
}

impl NetworkBlock {
    fn run(self) {
        let NetworkSignals { pre, release, post } = self.signals;
        let id = self.slot.id;

        thread::sleep(self.latency);
        pre.fire();

        if let Err(e) = release.wait_blocking() {
            tracing::warn!(request_id = %id, error = %e, "Release signal dropped, continuing");
        }

        if self.slot.try_claim() {
            deliver_body(id, &self.response.body, self.payload.as_ref(), self.data_callback.as_ref());
            for (name, value) in &self.response.headers {
                (self.header_callback)(name.as_str(), value.as_str());
            }

            tracing::debug!(request_id = %id, status = self.response.status, outcome = "completed", "Delivering response");
            (self.callback)(
                NetworkResponse::new()
                    .with_status(self.response.status)
                    .with_request_id(id)
                    .with_bytes_downloaded(self.response.body.len() as u64),
            );
            metrics::record_outcome(Outcome::Completed);
        } else if self.slot.deliver_cancellation(id) {
            tracing::debug!(request_id = %id, "Cancel arrived before send; cancellation delivered by network thread");
        } else {
            tracing::debug!(request_id = %id, outcome = "suppressed", "Completion lost the race to cancel");
            metrics::record_outcome(Outcome::Suppressed);
        }

        post.fire();
    }
}

/// Payload sink wins over the data callback; at most one receives the body.
fn deliver_body(id: RequestId, body: &[u8], payload: Option<&Payload>, data_callback: Option<&DataCallback>) {
    if let Some(payload) = payload {
        if let Err(e) = lock_payload(payload).write_all(body) {
            tracing::error!(request_id = %id, error = %e, "Failed to write response body to payload");
        }
    } else if let Some(data_callback) = data_callback {
        data_callback(body, 0, body.len());
    }
}

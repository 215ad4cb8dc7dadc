//! Network simulator subsystem.
//!
//! # Data Flow
//! ```text
//! Controlled request (controlled.rs):
//!     send → [latency] → fire pre → wait release
//!          → claim completion? ── yes → body, headers, completion
//!                              └─ no  → nothing (cancel already notified)
//!          → fire post
//!     cancel → claim completion? ── yes → cancellation on its own thread
//!                                └─ no  → no-op
//!
//! Scripted response (scripted.rs):
//!     send → [delay] → headers → body (data callback | payload) → completion
//!
//! Mock network (network_mock.rs):
//!     Network::send / Network::cancel → queued actions → the above
//! ```
//!
//! # States
//! ```text
//! CREATED → IN_FLIGHT → COMPLETED | CANCELLED
//! ```
//! Terminal states are final. The completion flag's atomic swap is the only
//! arbiter between the two terminal transitions.

pub mod controlled;
pub mod network_mock;
pub mod scripted;

use std::sync::Arc;

use crate::http::{
    Callback, DataCallback, ErrorCode, HeaderCallback, NetworkRequest, NetworkResponse, Payload,
    RequestId, SendOutcome,
};

pub use controlled::{controlled_request, controlled_request_with_config, MockedActions, MockedResponse};
pub use network_mock::NetworkMock;
pub use scripted::{return_http_response, ScriptedResponse};

/// Behavior of one `Network::send` call.
pub type SendAction = Box<
    dyn FnOnce(NetworkRequest, Option<Payload>, Callback, HeaderCallback, Option<DataCallback>) -> SendOutcome
        + Send,
>;

/// Behavior of `Network::cancel`; may be invoked any number of times.
pub type CancelAction = Arc<dyn Fn(RequestId) + Send + Sync>;

/// Error text carried by a cancellation response.
pub const CANCELLED_MESSAGE: &str = "Cancelled";

/// The response a cancelled request completes with.
pub fn cancelled_response(id: RequestId) -> NetworkResponse {
    NetworkResponse::new()
        .with_error(CANCELLED_MESSAGE)
        .with_status(ErrorCode::CancelledError.as_status())
        .with_request_id(id)
}

//! HTTP-facing types shared by the client under test and the simulator.
//!
//! # Data Flow
//! ```text
//! client under test
//!     → request.rs (NetworkRequest, RequestId)
//!     → network.rs (Network::send / Network::cancel, callbacks, payload)
//!     → [simulator decides what happens] (simulator/)
//!     → response.rs (NetworkResponse / ErrorCode into the completion callback)
//! ```

pub mod network;
pub mod request;
pub mod response;

pub use network::{
    lock_payload, Callback, DataCallback, HeaderCallback, Network, Payload, PayloadBuffer,
    PayloadSink,
};
pub use request::{NetworkRequest, RequestId, Verb};
pub use response::{ErrorCode, NetworkResponse, SendOutcome};

/// Ordered list of `(name, value)` header pairs.
pub type Headers = Vec<(String, String)>;

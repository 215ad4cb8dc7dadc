//! Deterministic network double for callback-based HTTP clients.
//!
//! # Architecture Overview
//!
//! ```text
//!   test                         client under test               netmock
//!   ────                         ─────────────────               ───────
//!   sync_triple() ──NetworkSignals──────────────────────▶ controlled_request()
//!        │                                                        │
//!        │                       Network::send ─────────▶ SendAction (detached thread)
//!        │◀── pre ─────────────────────────────────────────────── │
//!   [cancel here?]               Network::cancel ───────▶ CancelAction
//!        │── release ─────────────────────────────────────────▶   │
//!        │                       callbacks ◀──────────── body / headers / completion
//!        │◀── post ────────────────────────────────────────────── │
//! ```
//!
//! Exactly one of natural completion and cancellation reaches the client's
//! completion callback, whatever the interleaving; the test picks the
//! interleaving by choosing where to cancel relative to `release`.

// Interface the client under test is written against
pub mod http;

// Request simulation
pub mod lifecycle;
pub mod simulator;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::SimulatorConfig;
pub use http::{ErrorCode, Network, NetworkRequest, NetworkResponse, RequestId, SendOutcome};
pub use lifecycle::{sync_triple, NetworkSignals, TestSignals};
pub use simulator::{
    controlled_request, controlled_request_with_config, return_http_response, MockedActions, MockedResponse,
    NetworkMock, ScriptedResponse,
};

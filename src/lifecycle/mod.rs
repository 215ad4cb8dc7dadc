//! Lifecycle of a simulated request.
//!
//! # Data Flow
//! ```text
//! Test builds signals (signals.rs):
//!     sync_triple() → TestSignals (kept) + NetworkSignals (to simulator)
//!
//! Simulator starts work (spawn.rs):
//!     send → spawn_detached → fire pre → wait release → deliver → fire post
//!     cancel → spawn_detached → deliver cancellation
//! ```
//!
//! # Design Decisions
//! - Signals are consumed by value: firing twice does not compile
//! - Background work is never joined; `post` is the only teardown signal

pub mod signals;
pub mod spawn;

pub use signals::{signal, sync_triple, NetworkSignals, Signal, SignalError, SignalWaiter, TestSignals};
pub use spawn::spawn_detached;

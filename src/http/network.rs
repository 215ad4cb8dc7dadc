//! The network interface a client under test talks to.
//!
//! A client hands the network a request together with up to three callbacks
//! and, optionally, a payload sink for the body. Everything after `send`
//! returns happens on some other thread.

use std::io::{Cursor, Seek, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::http::{NetworkRequest, NetworkResponse, RequestId, SendOutcome};

/// Completion callback; invoked exactly once per request.
pub type Callback = Arc<dyn Fn(NetworkResponse) + Send + Sync>;

/// Invoked once per response header, in order.
pub type HeaderCallback = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Streaming body delivery: `(chunk, offset, length)`.
pub type DataCallback = Arc<dyn Fn(&[u8], u64, usize) + Send + Sync>;

/// Anything a response body can be written into.
pub trait PayloadSink: Write + Seek + Send {}

impl<T: Write + Seek + Send> PayloadSink for T {}

/// Shared body sink, written from the network thread.
pub type Payload = Arc<Mutex<dyn PayloadSink>>;

/// Lock a payload sink. A writer that panicked mid-write leaves bytes that
/// are still worth inspecting, so poisoning is ignored.
pub fn lock_payload(payload: &Payload) -> MutexGuard<'_, dyn PayloadSink + 'static> {
    payload.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory payload sink that stays inspectable after being handed out.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuffer {
    inner: Arc<Mutex<Cursor<Vec<u8>>>>,
}

impl PayloadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents, positioned at the beginning.
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Cursor::new(contents.into()))),
        }
    }

    /// A type-erased handle for [`Network::send`].
    pub fn payload(&self) -> Payload {
        self.inner.clone()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.lock().get_ref().clone()
    }

    pub fn position(&self) -> u64 {
        self.lock().position()
    }

    fn lock(&self) -> MutexGuard<'_, Cursor<Vec<u8>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Transport abstraction the client under test is written against.
pub trait Network: Send + Sync {
    /// Start a request. Returns immediately; all delivery is asynchronous.
    fn send(
        &self,
        request: NetworkRequest,
        payload: Option<Payload>,
        callback: Callback,
        header_callback: HeaderCallback,
        data_callback: Option<DataCallback>,
    ) -> SendOutcome;

    /// Abort a request previously started with [`Network::send`].
    fn cancel(&self, id: RequestId);
}

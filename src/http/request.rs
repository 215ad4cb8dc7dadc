//! Request identity and the request value handed to the network.
//!
//! # Responsibilities
//! - Allocate process-wide unique request IDs
//! - Carry the (opaque to the simulator) request description
//!
//! # Design Decisions
//! - IDs are never reclaimed; uniqueness only matters within one test process
//! - `0` is reserved as the invalid ID so a default-constructed response is
//!   distinguishable from a delivered one

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::http::Headers;

/// Global atomic counter for request IDs.
/// Relaxed ordering is enough: only uniqueness is required.
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(RequestId::MIN.0);

/// Unique identifier of a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RequestId(u64);

impl RequestId {
    /// Never handed out by the counter.
    pub const INVALID: RequestId = RequestId(0);
    /// First ID the counter hands out.
    pub const MIN: RequestId = RequestId(1);
    pub const MAX: RequestId = RequestId(u64::MAX);

    /// Draw the next ID from the process-wide counter.
    pub fn next() -> Self {
        Self(REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw value, e.g. one reported by a client under test.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verb {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// A request as issued by the client under test.
#[derive(Debug, Clone, Default)]
pub struct NetworkRequest {
    url: String,
    verb: Verb,
    headers: Headers,
    body: Option<Arc<Vec<u8>>>,
}

impl NetworkRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    /// Append a header; order is preserved.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Arc::new(body.into()));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref().map(Vec::as_slice)
    }
}

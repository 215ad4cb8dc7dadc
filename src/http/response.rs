//! Responses, send outcomes and transport error codes.
//!
//! # Design Decisions
//! - Transport errors are reported in-band as a negative status, the same
//!   channel a real HTTP status travels on
//! - Builders take `self` by value so responses read as one expression

use thiserror::Error;

use crate::http::RequestId;

/// Transport-level error codes reported as a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(i32)]
pub enum ErrorCode {
    #[error("success")]
    Success = 0,
    #[error("I/O error")]
    IoError = -1,
    #[error("authorization error")]
    AuthorizationError = -2,
    #[error("invalid URL")]
    InvalidUrlError = -3,
    #[error("network offline")]
    OfflineError = -4,
    #[error("request cancelled")]
    CancelledError = -5,
    #[error("authentication error")]
    AuthenticationError = -6,
    #[error("request timed out")]
    TimeoutError = -7,
    #[error("network overloaded")]
    NetworkOverloadError = -8,
    #[error("unknown error")]
    UnknownError = -9,
}

impl ErrorCode {
    /// The status value carried by a response for this code.
    pub fn as_status(self) -> i32 {
        self as i32
    }

    /// Map a response status back to an error code, if it is one.
    pub fn from_status(status: i32) -> Option<Self> {
        let code = match status {
            0 => ErrorCode::Success,
            -1 => ErrorCode::IoError,
            -2 => ErrorCode::AuthorizationError,
            -3 => ErrorCode::InvalidUrlError,
            -4 => ErrorCode::OfflineError,
            -5 => ErrorCode::CancelledError,
            -6 => ErrorCode::AuthenticationError,
            -7 => ErrorCode::TimeoutError,
            -8 => ErrorCode::NetworkOverloadError,
            -9 => ErrorCode::UnknownError,
            _ => return None,
        };
        Some(code)
    }
}

/// Final response delivered to the completion callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkResponse {
    status: i32,
    error: Option<String>,
    request_id: RequestId,
    bytes_uploaded: u64,
    bytes_downloaded: u64,
}

impl NetworkResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_bytes_uploaded(mut self, bytes: u64) -> Self {
        self.bytes_uploaded = bytes;
        self
    }

    pub fn with_bytes_downloaded(mut self, bytes: u64) -> Self {
        self.bytes_downloaded = bytes;
        self
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn bytes_uploaded(&self) -> u64 {
        self.bytes_uploaded
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.bytes_downloaded
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ErrorCode::CancelledError.as_status()
    }
}

/// Result of handing a request to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(RequestId),
    Failed(ErrorCode),
}

impl SendOutcome {
    pub fn ok(request_id: RequestId) -> Self {
        SendOutcome::Sent(request_id)
    }

    pub fn error(code: ErrorCode) -> Self {
        SendOutcome::Failed(code)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, SendOutcome::Sent(_))
    }

    /// The assigned ID, or [`RequestId::INVALID`] when the send failed.
    pub fn request_id(&self) -> RequestId {
        match self {
            SendOutcome::Sent(id) => *id,
            SendOutcome::Failed(_) => RequestId::INVALID,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            SendOutcome::Sent(_) => ErrorCode::Success,
            SendOutcome::Failed(code) => *code,
        }
    }
}

//! Provider status codes
//!
//! The surrounding provider speaks in NTSTATUS-style numeric codes. Every
//! [`Error`](super::Error) maps onto exactly one of these.

use core::fmt;

/// Status reported to the provider for a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    /// The call completed
    Success = 0x0000_0000,
    /// A parameter (key, blob, configuration) was rejected
    InvalidParameter = 0xC000_000D,
    /// An allocation failed
    NoMemory = 0xC000_0017,
    /// The caller's buffer cannot hold the requested export
    BufferTooSmall = 0xC000_0023,
    /// The feature is not available in this process
    NotSupported = 0xC000_00BB,
    /// Generic internal failure
    InternalError = 0xC000_00E5,
}

impl Status {
    /// Numeric status code
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Whether this status denotes success
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Look a status up by its numeric code
    pub fn from_code(code: u32) -> Option<Self> {
        [
            Status::Success,
            Status::InvalidParameter,
            Status::NoMemory,
            Status::BufferTooSmall,
            Status::NotSupported,
            Status::InternalError,
        ]
        .into_iter()
        .find(|status| status.code() == code)
    }

    fn name(self) -> &'static str {
        match self {
            Status::Success => "STATUS_SUCCESS",
            Status::InvalidParameter => "STATUS_INVALID_PARAMETER",
            Status::NoMemory => "STATUS_NO_MEMORY",
            Status::BufferTooSmall => "STATUS_BUFFER_TOO_SMALL",
            Status::NotSupported => "STATUS_NOT_SUPPORTED",
            Status::InternalError => "STATUS_INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010x})", self.name(), self.code())
    }
}

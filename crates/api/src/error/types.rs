//! Error type definitions for the ECDH secret computation path

use super::status::Status;
use crate::types::AlgorithmId;

/// Primary error type for secret computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller asked for a curve this library does not implement
    UnsupportedAlgorithm {
        context: &'static str,
        algorithm: AlgorithmId,
    },

    /// An allocation failed
    OutOfMemory {
        context: &'static str,
        requested: usize,
    },

    /// The backend accepted input or produced output of an unexpected shape
    Malformed {
        context: &'static str,
        message: String,
    },

    /// The backend reported a failure of its own
    Backend {
        context: &'static str,
        source: String,
        description: String,
    },

    /// No backend is loaded
    BackendUnavailable {
        context: &'static str,
    },

    /// The key collaborator refused to export its private blob
    KeyExport {
        context: &'static str,
        status: Status,
    },

    /// Invalid key error
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration could not be parsed
    Config {
        context: &'static str,
        message: String,
    },
}

/// Result type for secret computation
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Status reported to the provider for this error
    pub fn status(&self) -> Status {
        match self {
            Self::UnsupportedAlgorithm { .. } => Status::InternalError,
            Self::OutOfMemory { .. } => Status::NoMemory,
            Self::Malformed { .. } => Status::InternalError,
            Self::Backend { .. } => Status::InternalError,
            Self::BackendUnavailable { .. } => Status::NotSupported,
            Self::KeyExport { status, .. } => *status,
            Self::InvalidKey { .. } => Status::InvalidParameter,
            Self::InvalidLength { .. } => Status::InvalidParameter,
            Self::Config { .. } => Status::InvalidParameter,
        }
    }

    /// Context the error was raised in
    pub fn context(&self) -> &'static str {
        match self {
            Self::UnsupportedAlgorithm { context, .. }
            | Self::OutOfMemory { context, .. }
            | Self::Malformed { context, .. }
            | Self::Backend { context, .. }
            | Self::BackendUnavailable { context }
            | Self::KeyExport { context, .. }
            | Self::InvalidKey { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::Config { context, .. } => context,
        }
    }

    /// Replace the context of an existing error
    pub fn with_context(mut self, new_context: &'static str) -> Self {
        match &mut self {
            Self::UnsupportedAlgorithm { context, .. }
            | Self::OutOfMemory { context, .. }
            | Self::Malformed { context, .. }
            | Self::Backend { context, .. }
            | Self::BackendUnavailable { context }
            | Self::KeyExport { context, .. }
            | Self::InvalidKey { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::Config { context, .. } => *context = new_context,
        }
        self
    }

    /// Shorthand for a [`Error::Malformed`]
    pub fn malformed(context: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            context,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedAlgorithm { context, algorithm } => {
                write!(f, "{}: unsupported algorithm {}", context, algorithm)
            }
            Self::OutOfMemory { context, requested } => {
                write!(f, "{}: out of memory ({} bytes requested)", context, requested)
            }
            Self::Malformed { context, message } => {
                write!(f, "{}: malformed backend data: {}", context, message)
            }
            Self::Backend {
                context,
                source,
                description,
            } => {
                write!(f, "{}: backend error {}/{}", context, source, description)
            }
            Self::BackendUnavailable { context } => {
                write!(f, "{}: no elliptic-curve backend is loaded", context)
            }
            Self::KeyExport { context, status } => {
                write!(f, "{}: private key export failed with {}", context, status)
            }
            Self::InvalidKey { context, message } => {
                write!(f, "Invalid key: {}: {}", context, message)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::Config { context, message } => {
                write!(f, "Configuration error: {}: {}", context, message)
            }
        }
    }
}

//! Backend error codes

use core::fmt;
use dhsecret_api::Error as ApiError;

/// Subsystem of the backend that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    /// Expression construction and lookup
    Sexp,
    /// Public-key primitives
    Pubkey,
    /// Big-integer primitives
    Mpi,
    /// Point primitives
    Ec,
    /// Native scalar multiplication
    Native,
}

impl ErrorSource {
    /// Short name of the subsystem
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorSource::Sexp => "sexp",
            ErrorSource::Pubkey => "pubkey",
            ErrorSource::Mpi => "mpi",
            ErrorSource::Ec => "ec",
            ErrorSource::Native => "native",
        }
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BadFormat,
    MissingArgument,
    WrongArgType,
    NoObject,
    UnknownCurve,
    InvalidPoint,
    BadSecretKey,
    BufferTooShort,
    NotImplemented,
    OutOfCore,
    InvalidObject,
}

impl ErrorCode {
    /// Human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::BadFormat => "Invalid format",
            ErrorCode::MissingArgument => "Missing argument",
            ErrorCode::WrongArgType => "Wrong argument type",
            ErrorCode::NoObject => "No object",
            ErrorCode::UnknownCurve => "Unknown curve",
            ErrorCode::InvalidPoint => "Invalid point",
            ErrorCode::BadSecretKey => "Bad secret key",
            ErrorCode::BufferTooShort => "Provided buffer too short",
            ErrorCode::NotImplemented => "Not implemented",
            ErrorCode::OutOfCore => "Out of core",
            ErrorCode::InvalidObject => "Invalid object",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Error reported by a backend primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{origin}/{code}")]
pub struct BackendError {
    pub origin: ErrorSource,
    pub code: ErrorCode,
}

impl BackendError {
    pub const fn new(origin: ErrorSource, code: ErrorCode) -> Self {
        Self { origin, code }
    }

    /// Name of the subsystem that raised the error
    pub const fn source_str(&self) -> &'static str {
        self.origin.as_str()
    }

    /// Description of the error
    pub const fn description(&self) -> &'static str {
        self.code.description()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err.code {
            ErrorCode::OutOfCore => ApiError::OutOfMemory {
                context: "backend",
                requested: 0,
            },
            _ => ApiError::Backend {
                context: "backend",
                source: err.source_str().to_string(),
                description: err.description().to_string(),
            },
        }
    }
}

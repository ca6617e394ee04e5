//! Error handling for the ECDH secret computation path

pub mod status;
pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export the provider status codes
pub use status::Status;

// Re-export error traits
pub use traits::ResultExt;

impl std::error::Error for Error {}


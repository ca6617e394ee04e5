//! Public API traits and types for the dhsecret library
//!
//! This crate provides the surface shared by the backend and engine crates:
//! the error taxonomy and provider status codes, the curve parameter table,
//! the [`KeyObject`] collaborator trait and the [`Secret`] output type.

pub mod buffer;
pub mod curve;
pub mod error;
pub mod key;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use curve::{curve_params, CurveParams};
pub use error::{Error, Result, ResultExt, Status};
pub use key::KeyObject;
pub use types::{AlgorithmId, Secret};

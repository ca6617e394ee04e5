//! # dhsecret
//!
//! Raw ECDH shared-secret computation over NIST P-256 for provider key
//! objects.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dhsecret = "0.3"
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization of the shared API types
//! - `testing`: fault-injecting backend primitives for downstream tests
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dhsecret-api`]: Errors, status codes, key objects and secrets
//! - [`dhsecret-params`]: Curve and key-blob constants
//! - [`dhsecret-backend`]: Elliptic-curve arithmetic backends
//! - [`dhsecret-ecdh`]: The secret computation engine and its lifecycle

pub use dhsecret_api as api;
pub use dhsecret_backend as backend;
pub use dhsecret_ecdh as ecdh;
pub use dhsecret_params as params;

/// Common imports for dhsecret users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, ResultExt, Status};

    // Re-export key and secret types
    pub use crate::api::{AlgorithmId, KeyObject, Secret};
    pub use crate::ecdh::EccKey;

    // Re-export the engine surface
    pub use crate::backend::{BackendKind, EcdhBackend};
    pub use crate::ecdh::{
        compute_secret, compute_secret_ecc, initialize, is_available, uninitialize, EngineConfig,
        LengthPolicy,
    };
}

//! ECDH shared-secret computation engine
//!
//! Computes the raw ECDH shared secret for provider key objects on NIST
//! P-256. The engine transcodes the keys into backend inputs, runs the point
//! exchange on an [`EcdhBackend`](dhsecret_backend::EcdhBackend) and
//! normalizes the shared x-coordinate to a fixed-width [`Secret`].
//!
//! # Example
//!
//! ```no_run
//! use dhsecret_ecdh::{compute_secret, initialize, EccKey, EngineConfig};
//! use dhsecret_api::AlgorithmId;
//!
//! # fn main() -> dhsecret_api::Result<()> {
//! # let (private_blob, peer_blob) = (vec![0u8; 104], vec![0u8; 72]);
//! if initialize(&EngineConfig::default()) {
//!     let ours = EccKey::from_private_blob(AlgorithmId::EcdhP256, &private_blob)?;
//!     let theirs = EccKey::from_public_blob(AlgorithmId::EcdhP256, &peer_blob)?;
//!     let secret = compute_secret(&ours, &theirs)?;
//!     assert_eq!(secret.len(), 32);
//! }
//! # Ok(())
//! # }
//! ```

pub mod compute;
pub mod config;
pub mod exchange;
pub mod key;
pub mod lifecycle;
pub mod normalize;
pub mod transcode;

pub use compute::{compute_secret_ecc, compute_secret_with, Engine};
pub use config::{EngineConfig, LengthPolicy};
pub use key::EccKey;
pub use lifecycle::{compute_secret, initialize, initialize_from_env, initialize_with, is_available, uninitialize};
pub use normalize::NormalizeOptions;

pub use dhsecret_api::Secret;

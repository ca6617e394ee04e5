// File: crates/ecdh/src/compute/mod.rs
//! Shared-secret computation
//!
//! [`compute_secret_ecc`] runs the three stages in order:
//!
//! 1. transcode both keys into backend inputs
//! 2. run the point exchange on the backend
//! 3. normalize the shared x-coordinate to exactly one coordinate width
//!
//! Every intermediate object is owned by the call and released on all exit
//! paths. The first error ends the computation and is returned unchanged.

use std::sync::Arc;

use dhsecret_api::{curve_params, CurveParams, Error, KeyObject, Result, Secret};
use dhsecret_backend::EcdhBackend;

use crate::config::EngineConfig;
use crate::exchange;
use crate::normalize::{normalize, NormalizeOptions};
use crate::transcode;

/// A backend paired with the settings it runs under
#[derive(Clone)]
pub struct Engine {
    backend: Arc<dyn EcdhBackend>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(backend: Arc<dyn EcdhBackend>, config: EngineConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &dyn EcdhBackend {
        self.backend.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the secret shared by `private_key` and `public_key`
    pub fn compute_secret(&self, private_key: &dyn KeyObject, public_key: &dyn KeyObject) -> Result<Secret> {
        compute_secret_with(self.backend(), &self.config, private_key, public_key)
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Compute the ECDH shared secret with the default settings.
///
/// The secret is the big-endian x-coordinate of `d * Q`, exactly one
/// coordinate wide.
pub fn compute_secret_ecc(
    backend: &dyn EcdhBackend,
    private_key: &dyn KeyObject,
    public_key: &dyn KeyObject,
) -> Result<Secret> {
    compute_secret_with(backend, &EngineConfig::default(), private_key, public_key)
}

/// [`compute_secret_ecc`] under explicit settings
pub fn compute_secret_with(
    backend: &dyn EcdhBackend,
    config: &EngineConfig,
    private_key: &dyn KeyObject,
    public_key: &dyn KeyObject,
) -> Result<Secret> {
    let curve = resolve_curve(private_key, public_key)?;

    let point = transcode::public_point(curve, public_key)?;
    let scalar = transcode::private_scalar(curve, private_key)?;

    let shared = exchange::execute(backend, curve, &scalar, &point)?;
    drop(scalar);

    let options = NormalizeOptions {
        length_policy: config.length_policy,
        verify_pad_byte: config.verify_pad_byte,
    };
    normalize(shared.as_ref(), curve.coordinate_size, options)
}

/// Curve both keys belong to; checked before the backend is touched
fn resolve_curve(private_key: &dyn KeyObject, public_key: &dyn KeyObject) -> Result<&'static CurveParams> {
    let algorithm = public_key.algorithm_id();
    let curve = curve_params(algorithm).ok_or_else(|| {
        tracing::error!(algorithm = %algorithm, "unsupported algorithm for ECDH");
        Error::UnsupportedAlgorithm {
            context: "compute_secret_ecc",
            algorithm,
        }
    })?;

    if private_key.algorithm_id() != algorithm {
        tracing::error!(
            private = %private_key.algorithm_id(),
            public = %algorithm,
            "key algorithms differ"
        );
        return Err(Error::InvalidKey {
            context: "compute_secret_ecc",
            message: format!(
                "private key is {} but public key is {}",
                private_key.algorithm_id(),
                algorithm
            ),
        });
    }

    for key in [private_key, public_key] {
        if key.key_size() != curve.coordinate_size {
            return Err(Error::InvalidKey {
                context: "compute_secret_ecc",
                message: format!(
                    "key size {} does not match {} ({} bytes)",
                    key.key_size(),
                    curve.name,
                    curve.coordinate_size
                ),
            });
        }
    }
    Ok(curve)
}

#[cfg(test)]
mod tests;

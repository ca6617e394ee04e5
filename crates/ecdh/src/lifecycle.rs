//! Process-wide backend lifecycle
//!
//! The provider calls [`initialize`] once at startup and [`uninitialize`] at
//! shutdown. While no backend is loaded the feature is unavailable and
//! [`compute_secret`] fails with
//! [`Error::BackendUnavailable`](dhsecret_api::Error::BackendUnavailable).

use std::sync::Arc;

use dhsecret_api::{Error, KeyObject, Result, Secret};
use dhsecret_backend::EcdhBackend;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::compute::Engine;
use crate::config::EngineConfig;

static ENGINE: Lazy<RwLock<Option<Engine>>> = Lazy::new(|| RwLock::new(None));

/// Load the backend selected by `config`.
///
/// Returns `false` and leaves the feature disabled when the backend cannot
/// be opened or lacks a required primitive. A previously loaded backend is
/// unloaded in that case.
pub fn initialize(config: &EngineConfig) -> bool {
    match dhsecret_backend::open(config.backend) {
        Some(backend) => initialize_with(backend, config.clone()),
        None => {
            tracing::error!(backend = %config.backend, "failed to open elliptic-curve backend");
            uninitialize();
            false
        }
    }
}

/// [`initialize`] with the configuration read from the environment
pub fn initialize_from_env() -> bool {
    match EngineConfig::from_env() {
        Ok(config) => initialize(&config),
        Err(err) => {
            tracing::error!(error = %err, "invalid engine configuration");
            false
        }
    }
}

/// Install an already opened backend after checking its capabilities.
///
/// A backend missing any required primitive is dropped, and the feature is
/// left disabled.
pub fn initialize_with(backend: Arc<dyn EcdhBackend>, config: EngineConfig) -> bool {
    let required = backend.required_capabilities();
    let available = backend.capabilities();
    if !available.contains(required) {
        for primitive in available.missing(required) {
            tracing::error!(backend = backend.name(), primitive, "required backend primitive not found");
        }
        uninitialize();
        return false;
    }

    let name = backend.name();
    let previous = ENGINE.write().replace(Engine::new(backend, config));
    if previous.is_some() {
        tracing::debug!("replaced previously loaded backend");
    }
    tracing::info!(backend = name, "elliptic-curve backend loaded");
    true
}

/// Release the loaded backend. Safe to call when nothing is loaded.
pub fn uninitialize() {
    if let Some(engine) = ENGINE.write().take() {
        tracing::info!(backend = engine.backend().name(), "elliptic-curve backend unloaded");
    }
}

/// Whether a backend is loaded
pub fn is_available() -> bool {
    ENGINE.read().is_some()
}

/// Compute a shared secret with the loaded backend
pub fn compute_secret(private_key: &dyn KeyObject, public_key: &dyn KeyObject) -> Result<Secret> {
    let engine = ENGINE.read().clone().ok_or(Error::BackendUnavailable {
        context: "compute_secret",
    })?;
    engine.compute_secret(private_key, public_key)
}

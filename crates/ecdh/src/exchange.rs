//! Exchange execution and backend error mapping

use dhsecret_api::{CurveParams, Result, ResultExt};
use dhsecret_backend::{BackendError, EcdhBackend, SharedValue};

/// Log the backend's own error source and description
pub(crate) fn log_backend_error(err: BackendError) -> BackendError {
    tracing::error!("Error = {}/{}", err.source_str(), err.description());
    err
}

/// Multiply the public point by the private scalar on `backend`.
///
/// Returns the shared x-coordinate, still owned by the backend.
pub fn execute<'b>(
    backend: &'b dyn EcdhBackend,
    curve: &CurveParams,
    private_scalar: &[u8],
    public_point: &[u8],
) -> Result<Box<dyn SharedValue + 'b>> {
    tracing::trace!(backend = backend.name(), curve = curve.name, "running point exchange");
    backend
        .exchange(curve, private_scalar, public_point)
        .map_err(log_backend_error)
        .with_context("exchange::execute")
}

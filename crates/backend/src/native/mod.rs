//! Direct scalar multiplication

use dhsecret_api::CurveParams;

use crate::capabilities::Capabilities;
use crate::curve;
use crate::error::{BackendError, ErrorSource};
use crate::mpi::Mpi;
use crate::{EcdhBackend, SharedValue};

/// Backend computing `d * Q` with `p256` directly
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl EcdhBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native-p256"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn required_capabilities(&self) -> Capabilities {
        Capabilities::NATIVE_REQUIRED
    }

    fn exchange<'a>(
        &'a self,
        curve: &CurveParams,
        private_scalar: &[u8],
        public_point: &[u8],
    ) -> Result<Box<dyn SharedValue + 'a>, BackendError> {
        curve::ensure_supported(curve.name, ErrorSource::Native)?;
        let public = curve::public_point(public_point, ErrorSource::Native)?;
        let scalar = curve::scalar(private_scalar, ErrorSource::Native)?;

        let shared = p256::ecdh::diffie_hellman(scalar, public.as_affine());
        Ok(Box::new(Mpi::from_be_bytes(shared.raw_secret_bytes())))
    }
}

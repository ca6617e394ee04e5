//! Expression-driven backend
//!
//! The backend exposes no direct key-agreement call. The exchange is carried
//! out with ECDH *encryption*: the private scalar is wrapped as raw data and
//! encrypted for the peer's public key, which yields `(s d*Q)(e d*G)`. The
//! `s` component is the shared point; its x-coordinate is the secret.

mod primitives;
mod soft;

pub use primitives::Primitives;
pub use soft::SoftPrimitives;

use dhsecret_api::CurveParams;

use crate::capabilities::Capabilities;
use crate::error::BackendError;
use crate::mpi::MpiFormat;
use crate::sexp::SexpArg;
use crate::{EcdhBackend, SharedValue};

/// Public key as key data
pub const PUBLIC_KEY_FORMAT: &str = "(key-data(public-key(ecdh(curve %s)(q %b))))";

/// Private scalar as raw data to be encrypted
pub const RAW_DATA_FORMAT: &str = "(data(flags raw)(value %b))";

/// Backend over a table of expression primitives
#[derive(Debug, Default, Clone)]
pub struct ExprBackend<P = SoftPrimitives> {
    primitives: P,
}

impl<P: Primitives> ExprBackend<P> {
    pub fn new(primitives: P) -> Self {
        Self { primitives }
    }

    /// Primitive table in use
    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    fn import_public(&self, curve: &CurveParams, point: &[u8]) -> Result<P::Sexp, BackendError> {
        self.primitives
            .sexp_build(PUBLIC_KEY_FORMAT, &[SexpArg::Str(curve.name), SexpArg::Bytes(point)])
            .map_err(|err| {
                tracing::error!(error = %err, curve = curve.name, "failed to import public key");
                err
            })
    }

    fn import_private(&self, scalar: &[u8]) -> Result<P::Sexp, BackendError> {
        self.primitives
            .sexp_build(RAW_DATA_FORMAT, &[SexpArg::Bytes(scalar)])
            .map_err(|err| {
                tracing::error!(error = %err, "failed to import private scalar");
                err
            })
    }
}

/// Shared x-coordinate still owned by the primitive table
struct ExprValue<'a, P: Primitives> {
    primitives: &'a P,
    value: P::Mpi,
}

impl<P: Primitives> SharedValue for ExprValue<'_, P> {
    fn print(&self, format: MpiFormat, out: Option<&mut [u8]>) -> Result<usize, BackendError> {
        self.primitives.mpi_print(format, out, &self.value)
    }
}

impl<P: Primitives> EcdhBackend for ExprBackend<P> {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn capabilities(&self) -> Capabilities {
        self.primitives.capabilities()
    }

    fn required_capabilities(&self) -> Capabilities {
        Capabilities::EXPRESSION_REQUIRED
    }

    fn exchange<'a>(
        &'a self,
        curve: &CurveParams,
        private_scalar: &[u8],
        public_point: &[u8],
    ) -> Result<Box<dyn SharedValue + 'a>, BackendError> {
        let p = &self.primitives;

        let pubkey = self.import_public(curve, public_point)?;
        let data = self.import_private(private_scalar)?;

        // ECDH encryption of the private scalar for the peer key is the
        // exchange itself; the ephemeral `e` part is discarded.
        let encrypted = p.pk_encrypt(&data, &pubkey)?;
        drop(data);
        drop(pubkey);

        let s = p.sexp_extract_param(&encrypted, "", "s")?;
        drop(encrypted);

        let mut point = p.point_new()?;
        p.point_decode(&mut point, &s, None)?;
        drop(s);

        let mut x = p.mpi_new()?;
        p.point_snatch_x(&mut x, point);

        Ok(Box::new(ExprValue {
            primitives: p,
            value: x,
        }))
    }
}

#[cfg(test)]
mod tests;

//! Software primitive table
//!
//! Expressions, integers and points are the plain Rust types of this crate;
//! curve arithmetic comes from the `p256` crate.

use crate::capabilities::Capabilities;
use crate::curve;
use crate::error::{BackendError, ErrorCode, ErrorSource};
use crate::expr::Primitives;
use crate::mpi::{Mpi, MpiFormat};
use crate::point::EcPoint;
use crate::sexp::{Sexp, SexpArg};

const ENC_VAL_FORMAT: &str = "(enc-val(ecdh(s %b)(e %b)))";

/// Primitive table backed by `p256`
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftPrimitives;

impl SoftPrimitives {
    pub fn new() -> Self {
        Self
    }
}

fn pubkey_error(code: ErrorCode) -> BackendError {
    BackendError::new(ErrorSource::Pubkey, code)
}

impl Primitives for SoftPrimitives {
    type Sexp = Sexp;
    type Mpi = Mpi;
    type Point = EcPoint;

    fn capabilities(&self) -> Capabilities {
        Capabilities::EXPRESSION_REQUIRED
    }

    fn sexp_build(&self, format: &str, args: &[SexpArg<'_>]) -> Result<Sexp, BackendError> {
        Sexp::build(format, args)
    }

    /// ECDH encryption of a raw value `k` for public key `Q`.
    ///
    /// Returns `(enc-val(ecdh(s k*Q)(e k*G)))`.
    fn pk_encrypt(&self, data: &Sexp, pkey: &Sexp) -> Result<Sexp, BackendError> {
        let key = pkey
            .find_token("ecdh")
            .or_else(|| pkey.find_token("ecc"))
            .ok_or(pubkey_error(ErrorCode::NoObject))?;
        let curve_name = key
            .find_token("curve")
            .and_then(|curve| curve.nth_str(1))
            .ok_or(pubkey_error(ErrorCode::NoObject))?;
        curve::ensure_supported(curve_name, ErrorSource::Pubkey)?;
        let q = key
            .find_token("q")
            .and_then(|q| q.nth_data(1))
            .ok_or(pubkey_error(ErrorCode::NoObject))?;
        let public = curve::public_point(q, ErrorSource::Pubkey)?;

        if !data.has_flag("raw") {
            return Err(pubkey_error(ErrorCode::NotImplemented));
        }
        let value = data
            .find_token("value")
            .and_then(|value| value.nth_data(1))
            .ok_or(pubkey_error(ErrorCode::NoObject))?;
        let k = curve::scalar(value, ErrorSource::Pubkey)?;

        let shared = zeroize::Zeroizing::new(curve::multiply(&k, &public));
        let ephemeral = curve::multiply_base(&k);
        Sexp::build(
            ENC_VAL_FORMAT,
            &[SexpArg::Bytes(&shared), SexpArg::Bytes(&ephemeral)],
        )
    }

    fn sexp_extract_param(&self, sexp: &Sexp, path: &str, name: &str) -> Result<Mpi, BackendError> {
        sexp.extract_mpi(path, name)
    }

    fn point_new(&self) -> Result<EcPoint, BackendError> {
        Ok(EcPoint::new())
    }

    fn point_decode(
        &self,
        point: &mut EcPoint,
        value: &Mpi,
        curve: Option<&str>,
    ) -> Result<(), BackendError> {
        if let Some(name) = curve {
            curve::ensure_supported(name, ErrorSource::Ec)?;
            curve::public_point(value.as_be_bytes(), ErrorSource::Ec)?;
        }
        point.decode(value)
    }

    fn mpi_new(&self) -> Result<Mpi, BackendError> {
        Ok(Mpi::new())
    }

    fn point_snatch_x(&self, x: &mut Mpi, point: EcPoint) {
        *x = point.into_x();
    }

    fn mpi_print(
        &self,
        format: MpiFormat,
        out: Option<&mut [u8]>,
        value: &Mpi,
    ) -> Result<usize, BackendError> {
        value.print(format, out)
    }
}

//! P-256 arithmetic shared by the backends

use p256::{elliptic_curve::sec1::ToEncodedPoint, AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey};

use crate::error::{BackendError, ErrorCode, ErrorSource};
use dhsecret_params::traditional::ecdh::{ECDH_P256_COORDINATE_SIZE, ECDH_P256_CURVE_NAME};

const P256_ALIASES: [&str; 3] = [ECDH_P256_CURVE_NAME, "secp256r1", "prime256v1"];

/// Accept only names the arithmetic below implements
pub(crate) fn ensure_supported(name: &str, origin: ErrorSource) -> Result<(), BackendError> {
    if P256_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(name)) {
        Ok(())
    } else {
        tracing::debug!(curve = name, "curve not implemented by backend");
        Err(BackendError::new(origin, ErrorCode::UnknownCurve))
    }
}

/// Parse and validate a SEC1 point
pub(crate) fn public_point(encoded: &[u8], origin: ErrorSource) -> Result<PublicKey, BackendError> {
    PublicKey::from_sec1_bytes(encoded).map_err(|_| BackendError::new(origin, ErrorCode::InvalidPoint))
}

/// Interpret big-endian bytes as a scalar in `[1, n-1]`.
///
/// Shorter inputs are left-padded; longer ones are rejected.
pub(crate) fn scalar(bytes: &[u8], origin: ErrorSource) -> Result<NonZeroScalar, BackendError> {
    if bytes.len() > ECDH_P256_COORDINATE_SIZE {
        return Err(BackendError::new(origin, ErrorCode::BadSecretKey));
    }
    let mut repr = FieldBytes::default();
    repr[ECDH_P256_COORDINATE_SIZE - bytes.len()..].copy_from_slice(bytes);
    let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(repr));
    zeroize::Zeroize::zeroize(repr.as_mut_slice());
    scalar.ok_or(BackendError::new(origin, ErrorCode::BadSecretKey))
}

/// `k * Q` as an uncompressed encoding
pub(crate) fn multiply(k: &NonZeroScalar, q: &PublicKey) -> Vec<u8> {
    let product = AffinePoint::from(q.to_projective() * **k);
    product.to_encoded_point(false).as_bytes().to_vec()
}

/// `k * G` as an uncompressed encoding
pub(crate) fn multiply_base(k: &NonZeroScalar) -> Vec<u8> {
    let product = AffinePoint::from(ProjectivePoint::GENERATOR * **k);
    product.to_encoded_point(false).as_bytes().to_vec()
}

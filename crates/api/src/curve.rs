//! Curve parameter table
//!
//! Maps an [`AlgorithmId`] to the canonical curve name understood by the
//! backends and the byte length of one coordinate. Each supported id has
//! exactly one entry; ids without an entry are rejected before any backend
//! call. Adding a curve means adding an entry here and teaching a backend
//! the name.

use crate::types::AlgorithmId;
use dhsecret_params::traditional::ecdh::{
    ECDH_P256_COORDINATE_SIZE, ECDH_P256_CURVE_NAME, ECDH_P256_PRIVATE_MAGIC,
    ECDH_P256_PUBLIC_MAGIC,
};

/// Static description of a supported curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    /// Algorithm id this entry belongs to
    pub algorithm: AlgorithmId,
    /// Canonical curve name understood by the backends
    pub name: &'static str,
    /// Byte length of one coordinate and of the private scalar
    pub coordinate_size: usize,
    /// Magic stamped into public key blobs
    pub public_magic: u32,
    /// Magic stamped into private key blobs
    pub private_magic: u32,
}

impl CurveParams {
    /// Length of the uncompressed point encoding `0x04 || X || Y`
    pub const fn uncompressed_point_len(&self) -> usize {
        2 * self.coordinate_size + 1
    }
}

static CURVES: &[CurveParams] = &[CurveParams {
    algorithm: AlgorithmId::EcdhP256,
    name: ECDH_P256_CURVE_NAME,
    coordinate_size: ECDH_P256_COORDINATE_SIZE,
    public_magic: ECDH_P256_PUBLIC_MAGIC,
    private_magic: ECDH_P256_PRIVATE_MAGIC,
}];

/// Look up the parameters of a supported curve
pub fn curve_params(algorithm: AlgorithmId) -> Option<&'static CurveParams> {
    CURVES.iter().find(|curve| curve.algorithm == algorithm)
}


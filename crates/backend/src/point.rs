//! Elliptic-curve points in projective coordinates

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{BackendError, ErrorCode, ErrorSource};
use crate::mpi::Mpi;
use dhsecret_params::traditional::ecdh::UNCOMPRESSED_POINT_TAG;

/// Point `(x, y, z)`; `z == 0` is the point at infinity
#[derive(Debug, Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct EcPoint {
    x: Mpi,
    y: Mpi,
    z: Mpi,
}

impl EcPoint {
    /// The point at infinity
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an uncompressed SEC1 encoding carried in an integer.
    ///
    /// The integer's magnitude must be `0x04 || X || Y` with `X` and `Y` of
    /// equal width. Compressed encodings are not supported.
    pub fn decode(&mut self, value: &Mpi) -> Result<(), BackendError> {
        let bytes = value.as_be_bytes();
        match bytes.split_first() {
            Some((&UNCOMPRESSED_POINT_TAG, coordinates))
                if !coordinates.is_empty() && coordinates.len() % 2 == 0 =>
            {
                let (x, y) = coordinates.split_at(coordinates.len() / 2);
                self.x = Mpi::from_be_bytes(x);
                self.y = Mpi::from_be_bytes(y);
                self.z = Mpi::from_be_bytes(&[1]);
                Ok(())
            }
            Some((0x02 | 0x03, _)) => Err(BackendError::new(ErrorSource::Ec, ErrorCode::NotImplemented)),
            _ => Err(BackendError::new(ErrorSource::Ec, ErrorCode::InvalidPoint)),
        }
    }

    pub fn x(&self) -> &Mpi {
        &self.x
    }

    pub fn y(&self) -> &Mpi {
        &self.y
    }

    pub fn is_at_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Consume the point, keeping only its x-coordinate
    pub fn into_x(mut self) -> Mpi {
        self.x.take()
    }
}

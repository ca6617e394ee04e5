//! Multi-precision integers
//!
//! Only the operations the exchange needs: construction from big-endian
//! bytes and serialization.

use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{BackendError, ErrorCode, ErrorSource};

/// Serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpiFormat {
    /// Two's complement, big-endian. A non-negative value whose top bit is
    /// set gets a leading zero byte.
    Std,
    /// Unsigned big-endian magnitude
    Usg,
}

/// Non-negative big integer, stored as a minimal big-endian magnitude
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mpi {
    magnitude: Vec<u8>,
}

impl Mpi {
    /// The integer zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret `bytes` as an unsigned big-endian integer
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self {
            magnitude: bytes[start..].to_vec(),
        }
    }

    /// Minimal big-endian magnitude (empty for zero)
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.magnitude
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// Number of significant bits
    pub fn bits(&self) -> usize {
        match self.magnitude.first() {
            Some(&top) => self.magnitude.len() * 8 - top.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Serialize the integer.
    ///
    /// With `None` only the length is computed. With a buffer the encoding is
    /// written to its start; a buffer shorter than the encoding is an error.
    pub fn print(&self, format: MpiFormat, out: Option<&mut [u8]>) -> Result<usize, BackendError> {
        let pad = match format {
            MpiFormat::Std => self.magnitude.first().is_some_and(|&top| top & 0x80 != 0),
            MpiFormat::Usg => false,
        };
        let len = self.magnitude.len() + usize::from(pad);

        if let Some(out) = out {
            if out.len() < len {
                return Err(BackendError::new(ErrorSource::Mpi, ErrorCode::BufferTooShort));
            }
            let (head, tail) = out[..len].split_at_mut(usize::from(pad));
            head.fill(0);
            tail.copy_from_slice(&self.magnitude);
        }
        Ok(len)
    }

    /// Move the value out, leaving zero behind
    pub(crate) fn take(&mut self) -> Mpi {
        Mpi {
            magnitude: core::mem::take(&mut self.magnitude),
        }
    }
}

impl fmt::Debug for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mpi").field("bits", &self.bits()).finish()
    }
}

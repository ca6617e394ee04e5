//! Fallible scratch buffer allocation

use crate::error::{Error, Result};
use zeroize::Zeroizing;

/// Allocate a zero-filled buffer of `len` bytes, zeroed again on drop.
///
/// Allocation failure surfaces as [`Error::OutOfMemory`] instead of aborting.
pub fn try_zeroed(len: usize, context: &'static str) -> Result<Zeroizing<Vec<u8>>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory {
            context,
            requested: len,
        })?;
    buffer.resize(len, 0);
    Ok(Zeroizing::new(buffer))
}


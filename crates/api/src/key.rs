//! Key objects supplied by the surrounding provider

use crate::buffer::try_zeroed;
use crate::error::{Error, Result};
use crate::types::AlgorithmId;
use zeroize::Zeroizing;

/// Opaque key handle owned by the provider
///
/// The engine only reads through this trait; it never mutates or frees the
/// key.
pub trait KeyObject {
    /// Curve the key belongs to
    fn algorithm_id(&self) -> AlgorithmId;

    /// Byte length of one coordinate
    fn key_size(&self) -> usize;

    /// Public blob: `[header][X][Y]`
    fn public_blob(&self) -> &[u8];

    /// Export the private blob `[header][X][Y][d]`.
    ///
    /// With `None` only the required size is returned. With a buffer the blob
    /// is written to its start and the number of bytes written is returned;
    /// a buffer shorter than the blob fails with
    /// [`Status::BufferTooSmall`](crate::Status::BufferTooSmall).
    fn export_private(&self, buffer: Option<&mut [u8]>) -> Result<usize>;

    /// Export the private blob into an owned buffer.
    ///
    /// Runs the size query and the fetch back to back.
    fn export_private_blob(&self) -> Result<Zeroizing<Vec<u8>>> {
        let size = self.export_private(None)?;
        let mut blob = try_zeroed(size, "KeyObject::export_private_blob")?;
        let written = self.export_private(Some(&mut blob[..]))?;
        if written > size {
            return Err(Error::InvalidLength {
                context: "KeyObject::export_private_blob",
                expected: size,
                actual: written,
            });
        }
        blob.truncate(written);
        Ok(blob)
    }
}

//! Constants for the fixed-layout ECC key blobs
//!
//! A blob starts with a little-endian header `{ magic: u32, key_size: u32 }`
//! followed by the raw big-endian coordinates: `X || Y` for a public blob,
//! `X || Y || d` for a private blob.

/// Size of the blob header in bytes
pub const ECC_KEY_BLOB_HEADER_SIZE: usize = 8;

/// Offset of the magic within the header
pub const ECC_KEY_BLOB_MAGIC_OFFSET: usize = 0;

/// Offset of the declared coordinate size within the header
pub const ECC_KEY_BLOB_KEY_SIZE_OFFSET: usize = 4;

/// Total public blob length for a given coordinate size
pub const fn ecc_public_blob_len(coordinate_size: usize) -> usize {
    ECC_KEY_BLOB_HEADER_SIZE + 2 * coordinate_size
}

/// Total private blob length for a given coordinate size
pub const fn ecc_private_blob_len(coordinate_size: usize) -> usize {
    ECC_KEY_BLOB_HEADER_SIZE + 3 * coordinate_size
}

// File: crates/ecdh/src/key.rs
//! Concrete ECC key objects
//!
//! [`EccKey`] holds the fixed-layout blobs a provider stores for an ECC key:
//! an 8-byte little-endian header `{ magic, key_size }` followed by the raw
//! big-endian coordinates, `X || Y` for the public part and `X || Y || d`
//! for the private part.

use core::fmt;

use dhsecret_api::buffer::try_zeroed;
use dhsecret_api::{AlgorithmId, Error, KeyObject, Result, Status};
use dhsecret_params::traditional::ecdh::{
    ECDH_P256_COORDINATE_SIZE, ECDH_P256_PRIVATE_MAGIC, ECDH_P256_PUBLIC_MAGIC,
    ECDH_P384_COORDINATE_SIZE, ECDH_P384_PRIVATE_MAGIC, ECDH_P384_PUBLIC_MAGIC,
    ECDH_P521_COORDINATE_SIZE, ECDH_P521_PRIVATE_MAGIC, ECDH_P521_PUBLIC_MAGIC,
};
use dhsecret_params::utils::blob::{
    ecc_private_blob_len, ecc_public_blob_len, ECC_KEY_BLOB_HEADER_SIZE,
    ECC_KEY_BLOB_KEY_SIZE_OFFSET, ECC_KEY_BLOB_MAGIC_OFFSET,
};
use zeroize::Zeroizing;

/// Blob layout of one algorithm id
#[derive(Clone, Copy)]
struct BlobLayout {
    coordinate_size: usize,
    public_magic: u32,
    private_magic: u32,
}

fn layout(algorithm: AlgorithmId) -> BlobLayout {
    match algorithm {
        AlgorithmId::EcdhP256 => BlobLayout {
            coordinate_size: ECDH_P256_COORDINATE_SIZE,
            public_magic: ECDH_P256_PUBLIC_MAGIC,
            private_magic: ECDH_P256_PRIVATE_MAGIC,
        },
        AlgorithmId::EcdhP384 => BlobLayout {
            coordinate_size: ECDH_P384_COORDINATE_SIZE,
            public_magic: ECDH_P384_PUBLIC_MAGIC,
            private_magic: ECDH_P384_PRIVATE_MAGIC,
        },
        AlgorithmId::EcdhP521 => BlobLayout {
            coordinate_size: ECDH_P521_COORDINATE_SIZE,
            public_magic: ECDH_P521_PUBLIC_MAGIC,
            private_magic: ECDH_P521_PRIVATE_MAGIC,
        },
    }
}

fn read_u32_le(blob: &[u8], offset: usize) -> Option<u32> {
    let bytes = blob.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn write_header(blob: &mut [u8], magic: u32, coordinate_size: usize) {
    blob[ECC_KEY_BLOB_MAGIC_OFFSET..ECC_KEY_BLOB_MAGIC_OFFSET + 4].copy_from_slice(&magic.to_le_bytes());
    blob[ECC_KEY_BLOB_KEY_SIZE_OFFSET..ECC_KEY_BLOB_KEY_SIZE_OFFSET + 4]
        .copy_from_slice(&(coordinate_size as u32).to_le_bytes());
}

/// Validate the header and total length of a blob
fn check_blob(
    context: &'static str,
    blob: &[u8],
    magic: u32,
    coordinate_size: usize,
    expected_len: usize,
) -> Result<()> {
    if blob.len() != expected_len {
        return Err(Error::InvalidLength {
            context,
            expected: expected_len,
            actual: blob.len(),
        });
    }
    if read_u32_le(blob, ECC_KEY_BLOB_MAGIC_OFFSET) != Some(magic) {
        return Err(Error::InvalidKey {
            context,
            message: format!("blob magic is not {:#010x}", magic),
        });
    }
    let declared = read_u32_le(blob, ECC_KEY_BLOB_KEY_SIZE_OFFSET).map(|size| size as usize);
    if declared != Some(coordinate_size) {
        return Err(Error::InvalidKey {
            context,
            message: format!("declared key size {:?} does not match {}", declared, coordinate_size),
        });
    }
    Ok(())
}

fn check_coordinate(context: &'static str, bytes: &[u8], coordinate_size: usize) -> Result<()> {
    if bytes.len() != coordinate_size {
        return Err(Error::InvalidLength {
            context,
            expected: coordinate_size,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// ECC key object in the provider's blob layout
#[derive(Clone)]
pub struct EccKey {
    algorithm: AlgorithmId,
    key_size: usize,
    public_blob: Vec<u8>,
    private_blob: Option<Zeroizing<Vec<u8>>>,
}

impl EccKey {
    /// Import a public blob `[header][X][Y]`
    pub fn from_public_blob(algorithm: AlgorithmId, blob: &[u8]) -> Result<Self> {
        let layout = layout(algorithm);
        let cs = layout.coordinate_size;
        check_blob(
            "EccKey::from_public_blob",
            blob,
            layout.public_magic,
            cs,
            ecc_public_blob_len(cs),
        )?;
        Ok(Self {
            algorithm,
            key_size: cs,
            public_blob: blob.to_vec(),
            private_blob: None,
        })
    }

    /// Import a private blob `[header][X][Y][d]`
    pub fn from_private_blob(algorithm: AlgorithmId, blob: &[u8]) -> Result<Self> {
        let layout = layout(algorithm);
        let cs = layout.coordinate_size;
        check_blob(
            "EccKey::from_private_blob",
            blob,
            layout.private_magic,
            cs,
            ecc_private_blob_len(cs),
        )?;

        let mut public_blob = vec![0u8; ecc_public_blob_len(cs)];
        write_header(&mut public_blob, layout.public_magic, cs);
        public_blob[ECC_KEY_BLOB_HEADER_SIZE..]
            .copy_from_slice(&blob[ECC_KEY_BLOB_HEADER_SIZE..ECC_KEY_BLOB_HEADER_SIZE + 2 * cs]);

        Ok(Self {
            algorithm,
            key_size: cs,
            public_blob,
            private_blob: Some(Zeroizing::new(blob.to_vec())),
        })
    }

    /// Public key from raw big-endian coordinates
    pub fn public_from_raw(algorithm: AlgorithmId, x: &[u8], y: &[u8]) -> Result<Self> {
        let layout = layout(algorithm);
        let cs = layout.coordinate_size;
        check_coordinate("EccKey::public_from_raw", x, cs)?;
        check_coordinate("EccKey::public_from_raw", y, cs)?;

        let mut blob = vec![0u8; ecc_public_blob_len(cs)];
        write_header(&mut blob, layout.public_magic, cs);
        blob[ECC_KEY_BLOB_HEADER_SIZE..ECC_KEY_BLOB_HEADER_SIZE + cs].copy_from_slice(x);
        blob[ECC_KEY_BLOB_HEADER_SIZE + cs..].copy_from_slice(y);
        Self::from_public_blob(algorithm, &blob)
    }

    /// Private key from raw big-endian coordinates and scalar
    pub fn private_from_raw(algorithm: AlgorithmId, x: &[u8], y: &[u8], d: &[u8]) -> Result<Self> {
        let layout = layout(algorithm);
        let cs = layout.coordinate_size;
        check_coordinate("EccKey::private_from_raw", x, cs)?;
        check_coordinate("EccKey::private_from_raw", y, cs)?;
        check_coordinate("EccKey::private_from_raw", d, cs)?;

        let mut blob = Zeroizing::new(vec![0u8; ecc_private_blob_len(cs)]);
        write_header(&mut blob, layout.private_magic, cs);
        let coordinates = &mut blob[ECC_KEY_BLOB_HEADER_SIZE..];
        coordinates[..cs].copy_from_slice(x);
        coordinates[cs..2 * cs].copy_from_slice(y);
        coordinates[2 * cs..].copy_from_slice(d);
        Self::from_private_blob(algorithm, &blob)
    }

    /// Whether the private scalar is present
    pub fn has_private(&self) -> bool {
        self.private_blob.is_some()
    }

    /// Public half of this key
    pub fn to_public(&self) -> Self {
        Self {
            algorithm: self.algorithm,
            key_size: self.key_size,
            public_blob: self.public_blob.clone(),
            private_blob: None,
        }
    }
}

impl KeyObject for EccKey {
    fn algorithm_id(&self) -> AlgorithmId {
        self.algorithm
    }

    fn key_size(&self) -> usize {
        self.key_size
    }

    fn public_blob(&self) -> &[u8] {
        &self.public_blob
    }

    fn export_private(&self, buffer: Option<&mut [u8]>) -> Result<usize> {
        let blob = self.private_blob.as_ref().ok_or(Error::KeyExport {
            context: "EccKey::export_private",
            status: Status::InvalidParameter,
        })?;
        match buffer {
            None => Ok(blob.len()),
            Some(out) if out.len() < blob.len() => Err(Error::KeyExport {
                context: "EccKey::export_private",
                status: Status::BufferTooSmall,
            }),
            Some(out) => {
                out[..blob.len()].copy_from_slice(blob);
                Ok(blob.len())
            }
        }
    }

    fn export_private_blob(&self) -> Result<Zeroizing<Vec<u8>>> {
        let blob = self.private_blob.as_ref().ok_or(Error::KeyExport {
            context: "EccKey::export_private_blob",
            status: Status::InvalidParameter,
        })?;
        let mut copy = try_zeroed(blob.len(), "EccKey::export_private_blob")?;
        copy.copy_from_slice(blob);
        Ok(copy)
    }
}

impl fmt::Debug for EccKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EccKey")
            .field("algorithm", &self.algorithm)
            .field("key_size", &self.key_size)
            .field("private", &self.has_private())
            .finish()
    }
}

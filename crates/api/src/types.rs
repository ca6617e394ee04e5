//! Core types for the dhsecret library

use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Enumerated curve identifier carried by provider key objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmId {
    /// ECDH over NIST P-256
    EcdhP256,
    /// ECDH over NIST P-384 (recognised, not implemented)
    EcdhP384,
    /// ECDH over NIST P-521 (recognised, not implemented)
    EcdhP521,
}

impl AlgorithmId {
    /// Provider-facing algorithm name
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::EcdhP256 => "ECDH_P256",
            AlgorithmId::EcdhP384 => "ECDH_P384",
            AlgorithmId::EcdhP521 => "ECDH_P521",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared secret produced by an ECDH computation
///
/// The buffer is owned by the caller once returned and is zeroed on drop.
/// Equality is constant-time; `Debug` never prints the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    data: Vec<u8>,
}

impl Secret {
    /// Wrap an owned buffer
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Borrow the secret bytes (big-endian x-coordinate)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte length of the secret
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take the bytes out, keeping them zeroed on drop
    pub fn into_bytes(mut self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(core::mem::take(&mut self.data))
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.data.ct_eq(&other.data).into()
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.data.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

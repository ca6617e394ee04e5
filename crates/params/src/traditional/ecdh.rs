//! Constants for Elliptic Curve Diffie-Hellman

/// Canonical backend name of the NIST P-256 curve
pub const ECDH_P256_CURVE_NAME: &str = "NIST P-256";

/// Size of one coordinate (and of the private scalar) for P-256 in bytes
pub const ECDH_P256_COORDINATE_SIZE: usize = 32;

/// Size of one coordinate (and of the private scalar) for P-384 in bytes
pub const ECDH_P384_COORDINATE_SIZE: usize = 48;

/// Size of one coordinate (and of the private scalar) for P-521 in bytes
pub const ECDH_P521_COORDINATE_SIZE: usize = 66;

/// Leading byte of an uncompressed SEC1 point encoding
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Key blob magic: P-256 public key ("ECK1")
pub const ECDH_P256_PUBLIC_MAGIC: u32 = 0x314B_4345;

/// Key blob magic: P-256 private key ("ECK2")
pub const ECDH_P256_PRIVATE_MAGIC: u32 = 0x324B_4345;

/// Key blob magic: P-384 public key ("ECK3")
pub const ECDH_P384_PUBLIC_MAGIC: u32 = 0x334B_4345;

/// Key blob magic: P-384 private key ("ECK4")
pub const ECDH_P384_PRIVATE_MAGIC: u32 = 0x344B_4345;

/// Key blob magic: P-521 public key ("ECK5")
pub const ECDH_P521_PUBLIC_MAGIC: u32 = 0x354B_4345;

/// Key blob magic: P-521 private key ("ECK6")
pub const ECDH_P521_PRIVATE_MAGIC: u32 = 0x364B_4345;

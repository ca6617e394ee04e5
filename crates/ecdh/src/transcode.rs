//! Key transcoding
//!
//! Turns the provider's key blobs into the inputs of
//! [`EcdhBackend::exchange`](dhsecret_backend::EcdhBackend::exchange): the
//! uncompressed public point and the bare private scalar. Both come back in
//! zeroizing scratch buffers.

use dhsecret_api::buffer::try_zeroed;
use dhsecret_api::{CurveParams, Error, KeyObject, Result};
use dhsecret_params::traditional::ecdh::UNCOMPRESSED_POINT_TAG;
use dhsecret_params::utils::blob::{ecc_private_blob_len, ecc_public_blob_len, ECC_KEY_BLOB_HEADER_SIZE};
use zeroize::Zeroizing;

/// `0x04 || X || Y` from the public blob `[header][X][Y]`
pub fn public_point(curve: &CurveParams, key: &dyn KeyObject) -> Result<Zeroizing<Vec<u8>>> {
    let cs = curve.coordinate_size;
    let blob = key.public_blob();
    let needed = ecc_public_blob_len(cs);
    if blob.len() < needed {
        tracing::error!(
            expected = needed,
            actual = blob.len(),
            "public key blob too short"
        );
        return Err(Error::InvalidLength {
            context: "transcode::public_point",
            expected: needed,
            actual: blob.len(),
        });
    }

    let mut point = try_zeroed(curve.uncompressed_point_len(), "transcode::public_point")?;
    point[0] = UNCOMPRESSED_POINT_TAG;
    point[1..].copy_from_slice(&blob[ECC_KEY_BLOB_HEADER_SIZE..needed]);
    Ok(point)
}

/// The scalar `d` from the private blob `[header][X][Y][d]`.
///
/// The blob is exported with the key's size-negotiation protocol; an export
/// refusal is passed through unchanged.
pub fn private_scalar(curve: &CurveParams, key: &dyn KeyObject) -> Result<Zeroizing<Vec<u8>>> {
    let cs = curve.coordinate_size;
    let blob = key.export_private_blob().map_err(|err| {
        tracing::error!(error = %err, "private key export failed");
        err
    })?;

    let needed = ecc_private_blob_len(cs);
    if blob.len() < needed {
        tracing::error!(
            expected = needed,
            actual = blob.len(),
            "private key blob too short"
        );
        return Err(Error::InvalidLength {
            context: "transcode::private_scalar",
            expected: needed,
            actual: blob.len(),
        });
    }

    let offset = ECC_KEY_BLOB_HEADER_SIZE + 2 * cs;
    let mut scalar = try_zeroed(cs, "transcode::private_scalar")?;
    scalar.copy_from_slice(&blob[offset..offset + cs]);
    Ok(scalar)
}

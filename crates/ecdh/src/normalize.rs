//! Secret normalization
//!
//! The shared x-coordinate is serialized in two's complement, so a value
//! with its top bit set carries an extra leading zero and a value with
//! leading zero bytes comes out short. The result is always exactly one
//! coordinate wide.

use dhsecret_api::buffer::try_zeroed;
use dhsecret_api::{Error, Result, ResultExt, Secret};
use dhsecret_backend::{MpiFormat, SharedValue};

use crate::config::LengthPolicy;
use crate::exchange::log_backend_error;

/// Options of [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub length_policy: LengthPolicy,
    pub verify_pad_byte: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            length_policy: LengthPolicy::default(),
            verify_pad_byte: true,
        }
    }
}

fn unexpected_length(coordinate_size: usize, len: usize) -> Error {
    tracing::error!(
        coordinate_size,
        serialized = len,
        "shared secret has unexpected serialized length"
    );
    Error::malformed(
        "normalize",
        format!(
            "expected {} or {} bytes, got {}",
            coordinate_size,
            coordinate_size + 1,
            len
        ),
    )
}

/// Serialize `value` into a secret of exactly `coordinate_size` bytes
pub fn normalize(value: &dyn SharedValue, coordinate_size: usize, options: NormalizeOptions) -> Result<Secret> {
    let len = value
        .print(MpiFormat::Std, None)
        .map_err(log_backend_error)
        .with_context("normalize")?;

    let acceptable = match options.length_policy {
        LengthPolicy::Strict => len == coordinate_size || len == coordinate_size + 1,
        LengthPolicy::PadShort => len != 0 && len <= coordinate_size + 1,
    };
    if !acceptable {
        return Err(unexpected_length(coordinate_size, len));
    }

    let mut serialized = try_zeroed(len, "normalize")?;
    let written = value
        .print(MpiFormat::Std, Some(&mut serialized[..]))
        .map_err(log_backend_error)
        .with_context("normalize")?;
    if written != len {
        return Err(Error::malformed(
            "normalize",
            format!("serializer wrote {} of {} bytes", written, len),
        ));
    }

    let mut secret = try_zeroed(coordinate_size, "normalize")?;
    if len == coordinate_size + 1 {
        if options.verify_pad_byte && serialized[0] != 0 {
            tracing::error!("leading byte of shared secret is not a zero pad");
            return Err(Error::malformed("normalize", "stripped leading byte is non-zero"));
        }
        secret.copy_from_slice(&serialized[1..]);
    } else {
        secret[coordinate_size - len..].copy_from_slice(&serialized);
    }

    Ok(Secret::new(core::mem::take(&mut *secret)))
}

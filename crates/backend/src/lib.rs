//! Elliptic-curve arithmetic backends
//!
//! The engine talks to curve arithmetic through [`EcdhBackend`]: given a
//! curve, a raw private scalar and an uncompressed public point, produce the
//! shared x-coordinate as an integer the engine can serialize.
//!
//! Two implementations are provided:
//!
//! - [`ExprBackend`]: a backend driven through symbolic expressions and a
//!   table of primitives. It has no direct exchange call, so the exchange is
//!   carried out with its public-key encryption primitive.
//! - [`NativeBackend`]: direct scalar multiplication.
//!
//! Backends are chosen at startup with [`open`]; the engine then checks the
//! advertised [`Capabilities`] before accepting one.

pub mod capabilities;
pub mod error;
pub mod expr;
pub mod mpi;
pub mod native;
pub mod point;
pub mod sexp;

mod curve;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dhsecret_api::CurveParams;
use serde::{Deserialize, Serialize};

pub use capabilities::Capabilities;
pub use error::{BackendError, ErrorCode, ErrorSource};
pub use expr::{ExprBackend, Primitives, SoftPrimitives};
pub use mpi::{Mpi, MpiFormat};
pub use native::NativeBackend;
pub use point::EcPoint;
pub use sexp::{Sexp, SexpArg};

/// Integer result of an exchange, serializable through the backend that made it
pub trait SharedValue {
    /// Serialize the value.
    ///
    /// With `None` only the serialized length is returned. With a buffer the
    /// value is written to its start and the written length is returned.
    fn print(&self, format: MpiFormat, out: Option<&mut [u8]>) -> Result<usize, BackendError>;
}

impl SharedValue for Mpi {
    fn print(&self, format: MpiFormat, out: Option<&mut [u8]>) -> Result<usize, BackendError> {
        Mpi::print(self, format, out)
    }
}

/// Stable exchange interface every backend implements
pub trait EcdhBackend: Send + Sync {
    /// Short backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Primitives this backend provides
    fn capabilities(&self) -> Capabilities;

    /// Primitives this backend needs to be usable
    fn required_capabilities(&self) -> Capabilities;

    /// Multiply `public_point` by `private_scalar` on `curve` and return the
    /// x-coordinate of the product.
    ///
    /// `public_point` is the uncompressed encoding `0x04 || X || Y`;
    /// `private_scalar` is big-endian, exactly one coordinate wide.
    fn exchange<'a>(
        &'a self,
        curve: &CurveParams,
        private_scalar: &[u8],
        public_point: &[u8],
    ) -> Result<Box<dyn SharedValue + 'a>, BackendError>;
}

/// Backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Expression-driven backend with the encryption-based exchange
    #[default]
    Expression,
    /// Direct scalar multiplication
    Native,
    /// No backend; the feature stays unavailable
    Disabled,
}

impl BackendKind {
    /// Name used in configuration files and the environment
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Expression => "expression",
            BackendKind::Native => "native",
            BackendKind::Disabled => "disabled",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expression" => Ok(BackendKind::Expression),
            "native" => Ok(BackendKind::Native),
            "disabled" | "none" => Ok(BackendKind::Disabled),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Open the selected backend.
///
/// Returns `None` when no backend is available for `kind`.
pub fn open(kind: BackendKind) -> Option<Arc<dyn EcdhBackend>> {
    match kind {
        BackendKind::Expression => Some(Arc::new(ExprBackend::new(SoftPrimitives::default()))),
        BackendKind::Native => Some(Arc::new(NativeBackend)),
        BackendKind::Disabled => {
            tracing::warn!("no elliptic-curve backend selected, no support for diffie hellman key exchange");
            None
        }
    }
}

//! Primitive table of the expression backend

use crate::capabilities::Capabilities;
use crate::error::BackendError;
use crate::mpi::MpiFormat;
use crate::sexp::SexpArg;

/// The primitives the expression-driven exchange is written against.
///
/// Objects are released by dropping them.
pub trait Primitives: Send + Sync {
    /// Expression handle
    type Sexp: Send + 'static;
    /// Integer handle
    type Mpi: Send + 'static;
    /// Point handle
    type Point: Send + 'static;

    /// Primitives actually available
    fn capabilities(&self) -> Capabilities;

    /// Build an expression from a format string
    fn sexp_build(&self, format: &str, args: &[SexpArg<'_>]) -> Result<Self::Sexp, BackendError>;

    /// Encrypt `data` for the public key `pkey`
    fn pk_encrypt(&self, data: &Self::Sexp, pkey: &Self::Sexp) -> Result<Self::Sexp, BackendError>;

    /// Extract parameter `name` below `path` (empty for the whole expression)
    fn sexp_extract_param(
        &self,
        sexp: &Self::Sexp,
        path: &str,
        name: &str,
    ) -> Result<Self::Mpi, BackendError>;

    /// New point at infinity
    fn point_new(&self) -> Result<Self::Point, BackendError>;

    /// Decode `value` into `point`; `curve` names the curve when known
    fn point_decode(
        &self,
        point: &mut Self::Point,
        value: &Self::Mpi,
        curve: Option<&str>,
    ) -> Result<(), BackendError>;

    /// New integer set to zero
    fn mpi_new(&self) -> Result<Self::Mpi, BackendError>;

    /// Move the x-coordinate of `point` into `x`, consuming the point
    fn point_snatch_x(&self, x: &mut Self::Mpi, point: Self::Point);

    /// Serialize `value`; `None` only computes the length
    fn mpi_print(
        &self,
        format: MpiFormat,
        out: Option<&mut [u8]>,
        value: &Self::Mpi,
    ) -> Result<usize, BackendError>;
}

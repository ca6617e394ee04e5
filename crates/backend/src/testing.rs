//! Fault injection for the expression backend
//!
//! [`FaultyPrimitives`] wraps another primitive table, fails one chosen
//! primitive and counts live objects, so tests can check that every failure
//! path releases what it acquired.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::capabilities::Capabilities;
use crate::error::{BackendError, ErrorCode, ErrorSource};
use crate::expr::{Primitives, SoftPrimitives};
use crate::mpi::MpiFormat;
use crate::sexp::SexpArg;

/// Primitive call that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultStage {
    SexpBuildPublic,
    SexpBuildPrivate,
    PkEncrypt,
    ExtractParam,
    PointNew,
    PointDecode,
    MpiNew,
    MpiPrintQuery,
    MpiPrintFetch,
}

impl FaultStage {
    pub const ALL: [FaultStage; 9] = [
        FaultStage::SexpBuildPublic,
        FaultStage::SexpBuildPrivate,
        FaultStage::PkEncrypt,
        FaultStage::ExtractParam,
        FaultStage::PointNew,
        FaultStage::PointDecode,
        FaultStage::MpiNew,
        FaultStage::MpiPrintQuery,
        FaultStage::MpiPrintFetch,
    ];

    /// Error reported when this stage fails
    pub fn error(self) -> BackendError {
        let origin = match self {
            FaultStage::SexpBuildPublic | FaultStage::SexpBuildPrivate | FaultStage::ExtractParam => {
                ErrorSource::Sexp
            }
            FaultStage::PkEncrypt => ErrorSource::Pubkey,
            FaultStage::PointNew | FaultStage::PointDecode => ErrorSource::Ec,
            FaultStage::MpiNew | FaultStage::MpiPrintQuery | FaultStage::MpiPrintFetch => ErrorSource::Mpi,
        };
        let code = match self {
            FaultStage::PointDecode => ErrorCode::InvalidPoint,
            FaultStage::MpiPrintFetch => ErrorCode::BufferTooShort,
            FaultStage::PkEncrypt => ErrorCode::BadSecretKey,
            _ => ErrorCode::InvalidObject,
        };
        BackendError::new(origin, code)
    }
}

/// Decrements the live-object counter when dropped
#[derive(Debug)]
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Object counted while alive
#[derive(Debug)]
pub struct Tracked<T> {
    inner: T,
    _guard: LiveGuard,
}

impl<T> Tracked<T> {
    fn new(inner: T, live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            inner,
            _guard: LiveGuard(Arc::clone(live)),
        }
    }

    pub fn get(&self) -> &T {
        &self.inner
    }
}

/// Primitive table that fails at one stage and counts live objects
#[derive(Debug, Default)]
pub struct FaultyPrimitives<P = SoftPrimitives> {
    inner: P,
    fail_at: Option<FaultStage>,
    capabilities: Option<Capabilities>,
    live: Arc<AtomicUsize>,
}

impl<P: Primitives> FaultyPrimitives<P> {
    /// Pass-through wrapper
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            fail_at: None,
            capabilities: None,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wrapper failing at `stage`
    pub fn failing_at(inner: P, stage: FaultStage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::new(inner)
        }
    }

    /// Advertise `capabilities` instead of the wrapped table's
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Objects created through this table and not yet dropped
    pub fn live_objects(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Shared handle on the live-object counter
    pub fn live_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.live)
    }

    fn check(&self, stage: FaultStage) -> Result<(), BackendError> {
        match self.fail_at {
            Some(fail_at) if fail_at == stage => Err(stage.error()),
            _ => Ok(()),
        }
    }

    fn track<T>(&self, inner: T) -> Tracked<T> {
        Tracked::new(inner, &self.live)
    }
}

impl<P: Primitives> Primitives for FaultyPrimitives<P> {
    type Sexp = Tracked<P::Sexp>;
    type Mpi = Tracked<P::Mpi>;
    type Point = Tracked<P::Point>;

    fn capabilities(&self) -> Capabilities {
        self.capabilities.unwrap_or_else(|| self.inner.capabilities())
    }

    fn sexp_build(&self, format: &str, args: &[SexpArg<'_>]) -> Result<Self::Sexp, BackendError> {
        if format.contains("public-key") {
            self.check(FaultStage::SexpBuildPublic)?;
        } else {
            self.check(FaultStage::SexpBuildPrivate)?;
        }
        self.inner.sexp_build(format, args).map(|sexp| self.track(sexp))
    }

    fn pk_encrypt(&self, data: &Self::Sexp, pkey: &Self::Sexp) -> Result<Self::Sexp, BackendError> {
        self.check(FaultStage::PkEncrypt)?;
        self.inner
            .pk_encrypt(&data.inner, &pkey.inner)
            .map(|sexp| self.track(sexp))
    }

    fn sexp_extract_param(
        &self,
        sexp: &Self::Sexp,
        path: &str,
        name: &str,
    ) -> Result<Self::Mpi, BackendError> {
        self.check(FaultStage::ExtractParam)?;
        self.inner
            .sexp_extract_param(&sexp.inner, path, name)
            .map(|mpi| self.track(mpi))
    }

    fn point_new(&self) -> Result<Self::Point, BackendError> {
        self.check(FaultStage::PointNew)?;
        self.inner.point_new().map(|point| self.track(point))
    }

    fn point_decode(
        &self,
        point: &mut Self::Point,
        value: &Self::Mpi,
        curve: Option<&str>,
    ) -> Result<(), BackendError> {
        self.check(FaultStage::PointDecode)?;
        self.inner.point_decode(&mut point.inner, &value.inner, curve)
    }

    fn mpi_new(&self) -> Result<Self::Mpi, BackendError> {
        self.check(FaultStage::MpiNew)?;
        self.inner.mpi_new().map(|mpi| self.track(mpi))
    }

    fn point_snatch_x(&self, x: &mut Self::Mpi, point: Self::Point) {
        let Tracked { inner, _guard } = point;
        self.inner.point_snatch_x(&mut x.inner, inner);
    }

    fn mpi_print(
        &self,
        format: MpiFormat,
        out: Option<&mut [u8]>,
        value: &Self::Mpi,
    ) -> Result<usize, BackendError> {
        match out {
            None => self.check(FaultStage::MpiPrintQuery)?,
            Some(_) => self.check(FaultStage::MpiPrintFetch)?,
        }
        self.inner.mpi_print(format, out, &value.inner)
    }
}

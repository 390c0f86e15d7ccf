//! Shared accumulator for parallel simulation drivers
//!
//! Workers analyze their snapshots without holding the lock; only the fold
//! into the running totals is serialized.

use super::accumulator::RdfAccumulator;
use super::annulus::AnnulusAreaTable;
use super::contribution;
use super::report::RdfCurve;
use crate::core::error::{RdfError, RdfResult};
use crate::lattice::LatticeView;
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe handle around an [`RdfAccumulator`]. Clones share state.
#[derive(Clone, Debug)]
pub struct SharedRdfAccumulator {
    inner: Arc<Mutex<RdfAccumulator>>,
    /// Lock-free copy of the accumulator's table for worker-side analysis.
    table: Arc<AnnulusAreaTable>,
    width: usize,
}

impl SharedRdfAccumulator {
    pub fn new(width: usize) -> RdfResult<Self> {
        Ok(Self::from_accumulator(RdfAccumulator::new(width)?))
    }

    pub fn from_accumulator(acc: RdfAccumulator) -> Self {
        SharedRdfAccumulator {
            width: acc.width(),
            table: Arc::new(acc.areas().clone()),
            inner: Arc::new(Mutex::new(acc)),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Analyze outside the lock, fold under it.
    pub fn push<S: LatticeView + ?Sized>(
        &self,
        snapshot: &S,
        particle_count: usize,
    ) -> RdfResult<()> {
        if snapshot.width() != self.width {
            return Err(RdfError::WidthMismatch {
                expected: self.width,
                found: snapshot.width(),
            });
        }
        let density = contribution::analyze(&self.table, snapshot, particle_count);
        self.inner.lock().fold(&density)
    }

    /// Fold a worker-local partial accumulator.
    pub fn merge(&self, partial: &RdfAccumulator) -> RdfResult<()> {
        self.inner.lock().merge(partial)
    }

    pub fn simulations(&self) -> u64 {
        self.inner.lock().simulations()
    }

    pub fn finalize(&self) -> RdfResult<RdfCurve> {
        self.inner.lock().finalize()
    }

    /// Copy of the current accumulator state.
    pub fn snapshot(&self) -> RdfAccumulator {
        self.inner.lock().clone()
    }
}

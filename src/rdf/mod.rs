//! Radial Distribution Function
//!
//! Online estimator of particle-density deviation as a function of squared
//! displacement on a toroidal square lattice, averaged over many independent
//! simulation runs.
//!
//! Build order: annulus table → per-snapshot analysis → accumulator → report.

pub mod accumulator;
pub mod annulus;
pub mod contribution;
pub mod report;
pub mod shared;

pub use accumulator::RdfAccumulator;
pub use annulus::{AnnulusAreaTable, Offset};
pub use contribution::SnapshotDensity;
pub use report::{RdfCurve, RdfPoint};
pub use shared::SharedRdfAccumulator;

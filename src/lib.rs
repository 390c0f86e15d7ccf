//! lattice-rdf - Radial distribution function for periodic lattice simulations
//!
//! Reads snapshots of a toroidal square lattice of cooperators, cheaters and
//! producers through [`LatticeView`], measures how cheater density deviates
//! from the uniform density at each squared displacement, and averages that
//! profile across many independent simulation runs.
//!
//! ```no_run
//! use lattice_rdf::{CellType, Lattice, LatticeView, RdfAccumulator};
//!
//! # fn main() -> lattice_rdf::RdfResult<()> {
//! let mut acc = RdfAccumulator::new(64)?;
//! let mut lattice = Lattice::new(64, CellType::Producer);
//! lattice.set(32, 32, CellType::Cheater);
//! acc.push(&lattice, lattice.particle_count())?;
//! let curve = acc.finalize()?;
//! curve.write_report("output")?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod lattice;
pub mod rdf;

#[cfg(feature = "python")]
pub mod py_api;

// Re-export key types
pub use crate::core::config::RdfConfig;
pub use crate::core::error::{RdfError, RdfResult};
pub use lattice::{wrap, CellType, Lattice, LatticeView};
pub use rdf::{AnnulusAreaTable, RdfAccumulator, RdfCurve, RdfPoint, SharedRdfAccumulator};

/// Initialize tracing for the library.
pub fn setup_logging(level: Option<String>) {
    let filter = level.unwrap_or_else(|| "info".to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

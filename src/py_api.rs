//! Python bindings (feature `python`).

use crate::core::error::RdfError;
use crate::lattice::{Lattice, LatticeView};
use crate::rdf::RdfAccumulator;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

impl From<RdfError> for PyErr {
    fn from(err: RdfError) -> PyErr {
        match err {
            RdfError::Io { .. } => PyIOError::new_err(err.to_string()),
            RdfError::InsufficientData => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// RDF accumulator over row-major lattice snapshots of cell codes.
#[pyclass(name = "Rdf")]
pub struct PyRdf {
    acc: RdfAccumulator,
}

#[pymethods]
impl PyRdf {
    #[new]
    pub fn new(width: usize) -> PyResult<Self> {
        Ok(Self {
            acc: RdfAccumulator::new(width)?,
        })
    }

    /// Push one snapshot. Particle count defaults to the number of cheater sites.
    #[pyo3(signature = (codes, particle_count=None, parallel=false))]
    pub fn push(&mut self, codes: Vec<u8>, particle_count: Option<usize>, parallel: bool) -> PyResult<()> {
        let lattice = Lattice::from_codes(self.acc.width(), &codes)?;
        let n = particle_count.unwrap_or_else(|| lattice.particle_count());
        if parallel {
            self.acc.push_parallel(&lattice, n)?;
        } else {
            self.acc.push(&lattice, n)?;
        }
        Ok(())
    }

    #[getter]
    pub fn simulations(&self) -> u64 {
        self.acc.simulations()
    }

    /// `[(sq_displacement, rdf), ...]` ascending.
    pub fn finalize(&self) -> PyResult<Vec<(u32, f64)>> {
        let curve = self.acc.finalize()?;
        Ok(curve
            .points()
            .iter()
            .map(|p| (p.sq_displacement, p.value))
            .collect())
    }

    /// Write `<root>/rdf.txt`; returns the written path.
    pub fn write_report(&self, root: String) -> PyResult<String> {
        let curve = self.acc.finalize()?;
        curve.log();
        let path = curve.write_report(root)?;
        Ok(path.display().to_string())
    }
}

#[pyfunction]
#[pyo3(name = "setup_logging", signature = (level=None))]
fn py_setup_logging(level: Option<String>) {
    crate::setup_logging(level);
}

/// Python module initialization
#[pymodule]
fn lattice_rdf(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRdf>()?;
    m.add_function(wrap_pyfunction!(py_setup_logging, m)?)?;
    Ok(())
}

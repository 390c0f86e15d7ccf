//! Finalized RDF curve and its outputs
//!
//! - tab-separated report file (`<sq>\t<rdf>` per line, ascending)
//! - console/log lines (`R(<sq>) = <rdf>`)
//! - JSON for programmatic consumers

use crate::core::config::{RdfConfig, DEFAULT_REPORT_FILE};
use crate::core::error::{RdfError, RdfResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// One bin of the curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RdfPoint {
    pub sq_displacement: u32,
    pub value: f64,
}

/// Radially resolved mean density deviation, ascending by squared displacement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RdfCurve {
    points: Vec<RdfPoint>,
    simulations: u64,
}

impl RdfCurve {
    pub(crate) fn new(points: Vec<RdfPoint>, simulations: u64) -> Self {
        RdfCurve {
            points,
            simulations,
        }
    }

    pub fn points(&self) -> &[RdfPoint] {
        &self.points
    }

    /// Number of simulations averaged into the curve.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value(&self, sq_displacement: u32) -> Option<f64> {
        self.points
            .binary_search_by_key(&sq_displacement, |p| p.sq_displacement)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Write the tab-separated report body.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for p in &self.points {
            writeln!(out, "{}\t{}", p.sq_displacement, p.value)?;
        }
        out.flush()
    }

    /// Write `<root>/rdf.txt`, creating `root` recursively if needed.
    pub fn write_report(&self, root: impl AsRef<Path>) -> RdfResult<PathBuf> {
        self.write_report_as(root.as_ref(), DEFAULT_REPORT_FILE)
    }

    /// Write to the path named by `cfg`.
    pub fn write_with_config(&self, cfg: &RdfConfig) -> RdfResult<PathBuf> {
        self.write_report_as(&cfg.output_root, &cfg.report_file)
    }

    fn write_report_as(&self, root: &Path, file_name: &str) -> RdfResult<PathBuf> {
        fs::create_dir_all(root).map_err(|e| RdfError::io(root, e))?;
        let path = root.join(file_name);
        let file = File::create(&path).map_err(|e| RdfError::io(&path, e))?;
        self.write_tsv(BufWriter::new(file))
            .map_err(|e| RdfError::io(&path, e))?;

        info!(
            "[RDF] Wrote {} bins ({} simulations) to {}",
            self.points.len(),
            self.simulations,
            path.display()
        );
        Ok(path)
    }

    /// Emit one `R(<sq>) = <rdf>` line per bin through `tracing`.
    pub fn log(&self) {
        for p in &self.points {
            info!("R({}) = {}", p.sq_displacement, p.value);
        }
    }

    pub fn to_json(&self) -> RdfResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for RdfCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.points {
            writeln!(f, "R({}) = {}", p.sq_displacement, p.value)?;
        }
        Ok(())
    }
}

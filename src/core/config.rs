use super::error::{RdfError, RdfResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name of the tab-separated RDF report.
pub const DEFAULT_REPORT_FILE: &str = "rdf.txt";

/// Lattice and output parameters for an RDF run
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RdfConfig {
    /// Side length W of the square lattice.
    pub width: usize,
    /// Directory the report is written into. Created on demand.
    pub output_root: PathBuf,
    pub report_file: String,
}

impl RdfConfig {
    pub fn new(width: usize, output_root: impl Into<PathBuf>) -> Self {
        RdfConfig {
            width,
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON config. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> RdfResult<Self> {
        let cfg: RdfConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RdfResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RdfError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> RdfResult<()> {
        if self.width < 1 {
            return Err(RdfError::Configuration(format!(
                "lattice width must be at least 1, got {}",
                self.width
            )));
        }
        if self.report_file.trim().is_empty() {
            return Err(RdfError::Configuration(
                "report file name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of lattice sites, N = W².
    pub fn lattice_size(&self) -> usize {
        self.width * self.width
    }

    /// Largest per-axis offset that stays inside one period, floor((W-1)/2).
    pub fn max_radius(&self) -> usize {
        self.width.saturating_sub(1) / 2
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_root.join(&self.report_file)
    }
}

impl Default for RdfConfig {
    fn default() -> Self {
        RdfConfig {
            width: 100,
            output_root: PathBuf::from("output"),
            report_file: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

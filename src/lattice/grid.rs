// grid.rs — Owned square lattice.
//
// Row-major storage: site (x, y) lives at index y * W + x.

use super::{wrap, CellType, LatticeView};
use crate::core::error::{RdfError, RdfResult};

/// Minimal in-memory lattice snapshot.  No dynamics; callers set cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    width: usize,
    cells: Vec<CellType>,
}

impl Lattice {
    /// `width × width` lattice with every site set to `fill`.
    pub fn new(width: usize, fill: CellType) -> Self {
        Lattice {
            width,
            cells: vec![fill; width * width],
        }
    }

    /// Build from row-major cell codes (see [`CellType::from_code`]).
    pub fn from_codes(width: usize, codes: &[u8]) -> RdfResult<Self> {
        if codes.len() != width * width {
            return Err(RdfError::Configuration(format!(
                "expected {} cell codes for W={}, got {}",
                width * width,
                width,
                codes.len()
            )));
        }
        let cells = codes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                CellType::from_code(c).ok_or_else(|| {
                    RdfError::Configuration(format!("unknown cell code {} at site {}", c, i))
                })
            })
            .collect::<RdfResult<Vec<_>>>()?;
        Ok(Lattice { width, cells })
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> CellType {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, ty: CellType) {
        let i = self.index(x, y);
        self.cells[i] = ty;
    }

    /// Set a site addressed by signed, possibly out-of-range coordinates.
    pub fn set_wrapped(&mut self, x: i64, y: i64, ty: CellType) {
        let (wx, wy) = (wrap(x, self.width), wrap(y, self.width));
        self.set(wx, wy, ty);
    }

    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }
}

impl LatticeView for Lattice {
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn cell_type_at(&self, x: usize, y: usize) -> CellType {
        self.get(x, y)
    }

    fn particle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_particle()).count()
    }
}

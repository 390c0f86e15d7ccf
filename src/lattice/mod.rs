//! Lattice snapshot interface
//!
//! The simulation engine owns the lattice; the RDF core only reads cell types
//! through [`LatticeView`]. Coordinates handed to a view are always wrapped
//! into `[0, W)` first, so implementations never see out-of-range input.

pub mod grid;

use serde::{Deserialize, Serialize};

pub use grid::Lattice;

/// Discrete state of one lattice site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Empty = 0,
    Producer = 1,
    Cooperator = 2,
    Cheater = 3,
    Dead = 4,
}

impl CellType {
    /// Decode a numeric cell code as exported by lattice engines.
    pub fn from_code(code: u8) -> Option<CellType> {
        match code {
            0 => Some(CellType::Empty),
            1 => Some(CellType::Producer),
            2 => Some(CellType::Cooperator),
            3 => Some(CellType::Cheater),
            4 => Some(CellType::Dead),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the site counts toward the radial profile. Only cheaters do.
    #[inline]
    pub fn is_particle(self) -> bool {
        self == CellType::Cheater
    }
}

/// Read-only, per-coordinate access to a square toroidal lattice.
pub trait LatticeView {
    /// Side length W.
    fn width(&self) -> usize;

    /// Cell type at `(x, y)` with both coordinates in `[0, W)`.
    fn cell_type_at(&self, x: usize, y: usize) -> CellType;

    /// Number of sites, N = W².
    fn size(&self) -> usize {
        self.width() * self.width()
    }

    /// Count particle sites by scanning the whole lattice.
    fn particle_count(&self) -> usize {
        let w = self.width();
        let mut n = 0;
        for y in 0..w {
            for x in 0..w {
                if self.cell_type_at(x, y).is_particle() {
                    n += 1;
                }
            }
        }
        n
    }
}

impl<T: LatticeView + ?Sized> LatticeView for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn cell_type_at(&self, x: usize, y: usize) -> CellType {
        (**self).cell_type_at(x, y)
    }
}

/// Periodic wrap of a signed coordinate onto `[0, width)`.
///
/// True mathematical modulo, `((v % W) + W) % W`, not truncating remainder.
#[inline]
pub fn wrap(v: i64, width: usize) -> usize {
    let w = width as i64;
    (((v % w) + w) % w) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_true_modulo() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(-6, 5), 4);
        assert_eq!(wrap(3, 5), 3);
        assert_eq!(wrap(-10, 5), 0);
        assert_eq!(wrap(0, 1), 0);
        assert_eq!(wrap(-3, 1), 0);
    }

    #[test]
    fn cell_codes_round_trip() {
        for ty in [
            CellType::Empty,
            CellType::Producer,
            CellType::Cooperator,
            CellType::Cheater,
            CellType::Dead,
        ] {
            assert_eq!(CellType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(CellType::from_code(9), None);
    }

    #[test]
    fn only_cheaters_are_particles() {
        assert!(CellType::Cheater.is_particle());
        assert!(!CellType::Cooperator.is_particle());
        assert!(!CellType::Producer.is_particle());
        assert!(!CellType::Dead.is_particle());
        assert!(!CellType::Empty.is_particle());
    }
}

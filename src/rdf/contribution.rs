//! Per-snapshot density analysis
//!
//! For every particle origin, counts particle mass on each annulus of the
//! radius window (with periodic wrap), converts it to an areal density via the
//! annulus table and subtracts the ideal-gas density `particles / N`. The
//! per-origin deviations are summed into one slot vector per snapshot.
//!
//! This step reads the snapshot only, so it can run on any thread. Folding
//! the result into running totals is the accumulator's job.

use super::annulus::AnnulusAreaTable;
use crate::lattice::{wrap, LatticeView};
use rayon::prelude::*;

/// Summed density deviations of one snapshot, keyed by table slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotDensity {
    pub(crate) width: usize,
    pub(crate) particle_count: usize,
    pub(crate) mean_density: f64,
    /// Number of particle origins that contributed.
    pub(crate) origins: usize,
    /// `sums[slot]` = Σ over origins of (mass / area − mean).
    pub(crate) sums: Vec<f64>,
}

impl SnapshotDensity {
    fn empty(width: usize, particle_count: usize, mean_density: f64, slots: usize) -> Self {
        SnapshotDensity {
            width,
            particle_count,
            mean_density,
            origins: 0,
            sums: vec![0.0; slots],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Ideal-gas reference density, `particle_count / W²`.
    pub fn mean_density(&self) -> f64 {
        self.mean_density
    }

    pub fn origins(&self) -> usize {
        self.origins
    }

    /// True when nothing will be added to the running totals.
    pub fn is_empty(&self) -> bool {
        self.origins == 0 || self.particle_count == 0
    }

    /// Per-particle mean contribution at `slot`: summed deviation / particle count.
    pub fn normalized(&self, slot: usize) -> f64 {
        self.sums[slot] / self.particle_count as f64
    }

    fn absorb(mut self, other: SnapshotDensity) -> Self {
        self.origins += other.origins;
        for (a, b) in self.sums.iter_mut().zip(other.sums.iter()) {
            *a += *b;
        }
        self
    }
}

/// Add one origin's deviations into `out`.
///
/// `mass` is scratch space of `table.len()` entries; it is overwritten.
#[inline]
pub(crate) fn add_particle_contribution<S: LatticeView + ?Sized>(
    table: &AnnulusAreaTable,
    snapshot: &S,
    x: usize,
    y: usize,
    mean_density: f64,
    mass: &mut [f64],
    out: &mut [f64],
) {
    let w = snapshot.width();
    mass.iter_mut().for_each(|m| *m = 0.0);

    // The particle counts itself at r = 0.
    if let Some(origin) = table.slot(0) {
        mass[origin] = 1.0;
    }

    for off in table.offsets() {
        let nx = wrap(x as i64 + off.dx, w);
        let ny = wrap(y as i64 + off.dy, w);
        if snapshot.cell_type_at(nx, ny).is_particle() {
            mass[off.slot] += 1.0;
        }
    }

    for (slot, (&m, acc)) in mass.iter().zip(out.iter_mut()).enumerate() {
        let density = m / table.area_at(slot);
        *acc += density - mean_density;
    }
}

fn mean_density(width: usize, particle_count: usize) -> f64 {
    particle_count as f64 / (width * width) as f64
}

fn analyze_row<S: LatticeView + ?Sized>(
    table: &AnnulusAreaTable,
    snapshot: &S,
    y: usize,
    mean: f64,
    mass: &mut [f64],
    partial: &mut SnapshotDensity,
) {
    for x in 0..snapshot.width() {
        if snapshot.cell_type_at(x, y).is_particle() {
            add_particle_contribution(table, snapshot, x, y, mean, mass, &mut partial.sums);
            partial.origins += 1;
        }
    }
}

/// Sequential snapshot analysis.
pub fn analyze<S: LatticeView + ?Sized>(
    table: &AnnulusAreaTable,
    snapshot: &S,
    particle_count: usize,
) -> SnapshotDensity {
    let w = snapshot.width();
    let mean = mean_density(w, particle_count);
    let mut density = SnapshotDensity::empty(w, particle_count, mean, table.len());
    if particle_count == 0 {
        return density;
    }

    let mut mass = vec![0.0; table.len()];
    for y in 0..w {
        analyze_row(table, snapshot, y, mean, &mut mass, &mut density);
    }
    density
}

/// Row-parallel snapshot analysis. Same result as [`analyze`] up to
/// floating-point summation order.
pub fn analyze_parallel<S: LatticeView + Sync + ?Sized>(
    table: &AnnulusAreaTable,
    snapshot: &S,
    particle_count: usize,
) -> SnapshotDensity {
    let w = snapshot.width();
    let mean = mean_density(w, particle_count);
    let slots = table.len();
    if particle_count == 0 {
        return SnapshotDensity::empty(w, particle_count, mean, slots);
    }

    (0..w)
        .into_par_iter()
        .fold(
            || {
                (
                    vec![0.0; slots],
                    SnapshotDensity::empty(w, particle_count, mean, slots),
                )
            },
            |(mut mass, mut partial), y| {
                analyze_row(table, snapshot, y, mean, &mut mass, &mut partial);
                (mass, partial)
            },
        )
        .map(|(_, partial)| partial)
        .reduce(
            || SnapshotDensity::empty(w, particle_count, mean, slots),
            SnapshotDensity::absorb,
        )
}

//! Multi-simulation RDF accumulator
//!
//! Lifecycle: construct with the lattice width, `push` one snapshot per
//! completed simulation, `finalize` once to get the averaged curve.

use super::annulus::AnnulusAreaTable;
use super::contribution::{self, SnapshotDensity};
use super::report::{RdfCurve, RdfPoint};
use crate::core::config::RdfConfig;
use crate::core::error::{RdfError, RdfResult};
use crate::lattice::LatticeView;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Running per-displacement totals across simulations
#[derive(Clone, Debug)]
pub struct RdfAccumulator {
    width: usize,
    table: AnnulusAreaTable,
    /// Squared displacement → Σ per-simulation mean deviation.
    totals: BTreeMap<u32, f64>,
    simulations: u64,
}

impl RdfAccumulator {
    pub fn new(width: usize) -> RdfResult<Self> {
        if width < 1 {
            return Err(RdfError::Configuration(format!(
                "lattice width must be at least 1, got {}",
                width
            )));
        }
        let max_radius = (width - 1) / 2;
        let table = AnnulusAreaTable::build(max_radius);

        info!(
            "[RDF] Accumulator initialized (W={}, max_radius={}, bins={})",
            width,
            max_radius,
            table.len()
        );

        Ok(RdfAccumulator {
            width,
            table,
            totals: BTreeMap::new(),
            simulations: 0,
        })
    }

    pub fn from_config(cfg: &RdfConfig) -> RdfResult<Self> {
        cfg.validate()?;
        Self::new(cfg.width)
    }

    fn check_width(&self, found: usize) -> RdfResult<()> {
        if found != self.width {
            return Err(RdfError::WidthMismatch {
                expected: self.width,
                found,
            });
        }
        Ok(())
    }

    /// Analyze one snapshot without touching accumulator state.
    pub fn analyze<S: LatticeView + ?Sized>(
        &self,
        snapshot: &S,
        particle_count: usize,
    ) -> RdfResult<SnapshotDensity> {
        self.check_width(snapshot.width())?;
        Ok(contribution::analyze(&self.table, snapshot, particle_count))
    }

    /// Row-parallel variant of [`analyze`](Self::analyze).
    pub fn analyze_parallel<S: LatticeView + Sync + ?Sized>(
        &self,
        snapshot: &S,
        particle_count: usize,
    ) -> RdfResult<SnapshotDensity> {
        self.check_width(snapshot.width())?;
        Ok(contribution::analyze_parallel(
            &self.table,
            snapshot,
            particle_count,
        ))
    }

    /// Fold one analyzed snapshot into the totals and count the simulation.
    pub fn fold(&mut self, density: &SnapshotDensity) -> RdfResult<()> {
        self.check_width(density.width())?;

        if density.particle_count() == 0 {
            warn!(
                "[RDF] Simulation {} has no particles; counted with zero contribution",
                self.simulations + 1
            );
        } else if !density.is_empty() {
            for slot in 0..self.table.len() {
                let key = self.table.key_at(slot);
                *self.totals.entry(key).or_insert(0.0) += density.normalized(slot);
            }
        }

        self.simulations += 1;
        debug!(
            "[RDF] Folded simulation {} (particles={}, origins={})",
            self.simulations,
            density.particle_count(),
            density.origins()
        );
        Ok(())
    }

    /// Accumulate one completed simulation.
    ///
    /// `particle_count == 0` contributes nothing but still counts toward the
    /// averaging denominator.
    pub fn push<S: LatticeView + ?Sized>(
        &mut self,
        snapshot: &S,
        particle_count: usize,
    ) -> RdfResult<()> {
        let density = self.analyze(snapshot, particle_count)?;
        self.fold(&density)
    }

    pub fn push_parallel<S: LatticeView + Sync + ?Sized>(
        &mut self,
        snapshot: &S,
        particle_count: usize,
    ) -> RdfResult<()> {
        let density = self.analyze_parallel(snapshot, particle_count)?;
        self.fold(&density)
    }

    /// Add another accumulator's totals and simulation count into this one.
    pub fn merge(&mut self, other: &RdfAccumulator) -> RdfResult<()> {
        self.check_width(other.width)?;
        for (&key, &value) in &other.totals {
            *self.totals.entry(key).or_insert(0.0) += value;
        }
        self.simulations += other.simulations;
        Ok(())
    }

    /// Average the totals over all simulations, ascending by squared displacement.
    pub fn finalize(&self) -> RdfResult<RdfCurve> {
        if self.simulations == 0 {
            return Err(RdfError::InsufficientData);
        }
        let n = self.simulations as f64;
        let points = self
            .totals
            .iter()
            .map(|(&sq, &total)| RdfPoint {
                sq_displacement: sq,
                value: total / n,
            })
            .collect();
        Ok(RdfCurve::new(points, self.simulations))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn max_radius(&self) -> usize {
        self.table.max_radius()
    }

    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    pub fn total(&self, sq: u32) -> Option<f64> {
        self.totals.get(&sq).copied()
    }

    pub fn totals(&self) -> &BTreeMap<u32, f64> {
        &self.totals
    }

    pub fn areas(&self) -> &AnnulusAreaTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{CellType, Lattice};
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-12;

    fn random_lattice(width: usize, fraction: f64, seed: u64) -> Lattice {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut lat = Lattice::new(width, CellType::Cooperator);
        for y in 0..width {
            for x in 0..width {
                if rng.gen_bool(fraction) {
                    lat.set(x, y, CellType::Cheater);
                }
            }
        }
        lat
    }

    fn single_cheater(width: usize) -> Lattice {
        let mut lat = Lattice::new(width, CellType::Producer);
        lat.set(width / 2, width / 2, CellType::Cheater);
        lat
    }

    #[test]
    fn zero_width_is_a_configuration_error() {
        assert!(matches!(
            RdfAccumulator::new(0),
            Err(RdfError::Configuration(_))
        ));
    }

    #[test]
    fn width_one_has_only_self_bin() {
        let mut acc = RdfAccumulator::new(1).unwrap();
        assert_eq!(acc.max_radius(), 0);
        let lat = Lattice::new(1, CellType::Cheater);
        acc.push(&lat, 1).unwrap();
        let curve = acc.finalize().unwrap();
        assert_eq!(curve.len(), 1);
        // density 1 at r=0, mean 1
        assert!(curve.value(0).unwrap().abs() < EPS);
    }

    #[test]
    fn finalize_before_push_is_insufficient_data() {
        let acc = RdfAccumulator::new(5).unwrap();
        assert!(matches!(acc.finalize(), Err(RdfError::InsufficientData)));
    }

    #[test]
    fn push_without_particles_only_counts_simulation() {
        let mut acc = RdfAccumulator::new(5).unwrap();
        let empty = Lattice::new(5, CellType::Producer);
        acc.push(&empty, 0).unwrap();
        assert_eq!(acc.simulations(), 1);
        assert!(acc.totals().is_empty());

        // Nonzero count but no cheater sites: still nothing to add.
        acc.push(&empty, 3).unwrap();
        assert_eq!(acc.simulations(), 2);
        assert!(acc.totals().is_empty());
    }

    #[test]
    fn zero_simulations_dilute_the_average() {
        let lat = single_cheater(5);
        let mut once = RdfAccumulator::new(5).unwrap();
        once.push(&lat, 1).unwrap();

        let mut diluted = RdfAccumulator::new(5).unwrap();
        diluted.push(&lat, 1).unwrap();
        diluted.push(&Lattice::new(5, CellType::Empty), 0).unwrap();

        let a = once.finalize().unwrap();
        let b = diluted.finalize().unwrap();
        for (pa, pb) in a.points().iter().zip(b.points()) {
            assert!((pa.value / 2.0 - pb.value).abs() < EPS);
        }
    }

    #[test]
    fn single_cheater_curve() {
        let mut acc = RdfAccumulator::new(5).unwrap();
        acc.push(&single_cheater(5), 1).unwrap();
        let curve = acc.finalize().unwrap();
        let mean = 1.0 / 25.0;

        let keys: Vec<u32> = curve.points().iter().map(|p| p.sq_displacement).collect();
        assert_eq!(keys, vec![0, 1, 2, 4, 5, 8]);
        assert!((curve.value(0).unwrap() - (1.0 - mean)).abs() < EPS);
        for sq in [1, 2, 4, 5, 8] {
            assert!((curve.value(sq).unwrap() + mean).abs() < EPS);
        }
    }

    #[test]
    fn identical_pushes_scale_totals_and_keep_curve() {
        let lat = random_lattice(11, 0.3, 7);
        let n = lat.particle_count();

        let mut single = RdfAccumulator::new(11).unwrap();
        single.push(&lat, n).unwrap();

        let mut repeated = RdfAccumulator::new(11).unwrap();
        for _ in 0..4 {
            repeated.push(&lat, n).unwrap();
        }

        for (key, &one) in single.totals() {
            let four = repeated.total(*key).unwrap();
            assert!((four - 4.0 * one).abs() < 1e-9, "key {}", key);
        }

        let a = single.finalize().unwrap();
        let b = repeated.finalize().unwrap();
        for (pa, pb) in a.points().iter().zip(b.points()) {
            assert_eq!(pa.sq_displacement, pb.sq_displacement);
            assert!((pa.value - pb.value).abs() < 1e-9);
        }
    }

    #[test]
    fn uniform_lattice_has_no_deviation() {
        for width in [4usize, 5, 8] {
            let lat = Lattice::new(width, CellType::Cheater);
            let mut acc = RdfAccumulator::new(width).unwrap();
            acc.push(&lat, width * width).unwrap();
            for p in acc.finalize().unwrap().points() {
                assert!(p.value.abs() < 1e-9, "W={} sq={} got {}", width, p.sq_displacement, p.value);
            }
        }
    }

    #[test]
    fn opposite_deviations_cancel() {
        let mut acc = RdfAccumulator::new(5).unwrap();
        let s1 = acc.areas().slot(1).unwrap();

        let mut a = acc.analyze(&single_cheater(5), 1).unwrap();
        let mut b = a.clone();
        a.sums.iter_mut().for_each(|v| *v = 0.0);
        b.sums.iter_mut().for_each(|v| *v = 0.0);
        a.sums[s1] = 0.375;
        b.sums[s1] = -0.375;

        acc.fold(&a).unwrap();
        acc.fold(&b).unwrap();
        assert_eq!(acc.finalize().unwrap().value(1), Some(0.0));
    }

    #[test]
    fn finalize_is_idempotent() {
        let lat = random_lattice(9, 0.2, 3);
        let mut acc = RdfAccumulator::new(9).unwrap();
        acc.push(&lat, lat.particle_count()).unwrap();
        let first = acc.finalize().unwrap();
        let second = acc.finalize().unwrap();
        assert_eq!(first, second);
        assert_eq!(acc.simulations(), 1);
    }

    #[test]
    fn width_mismatch_leaves_state_untouched() {
        let mut acc = RdfAccumulator::new(5).unwrap();
        let err = acc.push(&Lattice::new(7, CellType::Cheater), 49).unwrap_err();
        assert!(matches!(
            err,
            RdfError::WidthMismatch { expected: 5, found: 7 }
        ));
        assert_eq!(acc.simulations(), 0);
        assert!(acc.totals().is_empty());
    }

    #[test]
    fn totals_keys_come_from_the_area_table() {
        let lat = random_lattice(12, 0.25, 11);
        let mut acc = RdfAccumulator::new(12).unwrap();
        acc.push(&lat, lat.particle_count()).unwrap();
        for key in acc.totals().keys() {
            assert!(acc.areas().area(*key).is_some(), "key {}", key);
        }
    }

    #[test]
    fn push_parallel_matches_push() {
        let lat = random_lattice(15, 0.4, 21);
        let n = lat.particle_count();
        let mut serial = RdfAccumulator::new(15).unwrap();
        let mut parallel = RdfAccumulator::new(15).unwrap();
        serial.push(&lat, n).unwrap();
        parallel.push_parallel(&lat, n).unwrap();

        let a = serial.finalize().unwrap();
        let b = parallel.finalize().unwrap();
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.points().iter().zip(b.points()) {
            assert!((pa.value - pb.value).abs() < 1e-9);
        }
    }

    #[test]
    fn merge_equals_pushing_into_one() {
        let l1 = random_lattice(10, 0.3, 1);
        let l2 = random_lattice(10, 0.5, 2);

        let mut both = RdfAccumulator::new(10).unwrap();
        both.push(&l1, l1.particle_count()).unwrap();
        both.push(&l2, l2.particle_count()).unwrap();

        let mut left = RdfAccumulator::new(10).unwrap();
        let mut right = RdfAccumulator::new(10).unwrap();
        left.push(&l1, l1.particle_count()).unwrap();
        right.push(&l2, l2.particle_count()).unwrap();
        left.merge(&right).unwrap();

        assert_eq!(left.simulations(), 2);
        let a = both.finalize().unwrap();
        let b = left.finalize().unwrap();
        for (pa, pb) in a.points().iter().zip(b.points()) {
            assert!((pa.value - pb.value).abs() < 1e-12);
        }

        let other = RdfAccumulator::new(11).unwrap();
        assert!(left.merge(&other).is_err());
    }
}

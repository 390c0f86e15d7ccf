//! Annulus area table
//!
//! Maps each squared displacement `dx² + dy²` reachable inside the
//! `[-r, r]²` offset window to the number of offsets that produce it.
//! The self-point (key 0) is fixed at area 1 instead of being counted.

use std::collections::BTreeMap;

/// One lattice offset inside the radius window, origin excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
    /// Squared displacement `dx² + dy²`.
    pub sq: u32,
    /// Dense slot of `sq` in the table.
    pub slot: usize,
}

/// Immutable squared-displacement → annulus area mapping.
#[derive(Clone, Debug)]
pub struct AnnulusAreaTable {
    max_radius: usize,
    areas: BTreeMap<u32, f64>,
    /// Keys in ascending order; index = slot.
    keys: Vec<u32>,
    /// Areas in slot order.
    slot_areas: Vec<f64>,
    /// `slots[sq]` = slot of `sq`, `None` for unreachable displacements.
    slots: Vec<Option<usize>>,
    offsets: Vec<Offset>,
}

impl AnnulusAreaTable {
    pub fn build(max_radius: usize) -> Self {
        let r = max_radius as i64;

        // ── Pass 1: count offsets per squared displacement ───────────────────
        let mut areas: BTreeMap<u32, f64> = BTreeMap::new();
        for dx in -r..=r {
            for dy in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                *areas.entry((dx * dx + dy * dy) as u32).or_insert(0.0) += 1.0;
            }
        }
        // Self-point annulus is 1 by convention, not by counting.
        areas.insert(0, 1.0);

        // ── Dense slot index ─────────────────────────────────────────────────
        let keys: Vec<u32> = areas.keys().copied().collect();
        let slot_areas: Vec<f64> = areas.values().copied().collect();
        let max_sq = (2 * r * r) as usize;
        let mut slots = vec![None; max_sq + 1];
        for (slot, &sq) in keys.iter().enumerate() {
            slots[sq as usize] = Some(slot);
        }

        // ── Pass 2: offset list with resolved slots ──────────────────────────
        let mut offsets = Vec::with_capacity(((2 * r + 1) * (2 * r + 1) - 1) as usize);
        for dx in -r..=r {
            for dy in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let sq = (dx * dx + dy * dy) as u32;
                if let Some(slot) = slots[sq as usize] {
                    offsets.push(Offset { dx, dy, sq, slot });
                }
            }
        }

        AnnulusAreaTable {
            max_radius,
            areas,
            keys,
            slot_areas,
            slots,
            offsets,
        }
    }

    pub fn max_radius(&self) -> usize {
        self.max_radius
    }

    /// Area for squared displacement `sq`, if reachable.
    pub fn area(&self, sq: u32) -> Option<f64> {
        self.areas.get(&sq).copied()
    }

    /// Area by dense slot. Panics on an out-of-range slot.
    #[inline]
    pub fn area_at(&self, slot: usize) -> f64 {
        self.slot_areas[slot]
    }

    #[inline]
    pub fn slot(&self, sq: u32) -> Option<usize> {
        self.slots.get(sq as usize).copied().flatten()
    }

    /// Squared displacement stored at `slot`.
    #[inline]
    pub fn key_at(&self, slot: usize) -> u32 {
        self.keys[slot]
    }

    /// Ascending squared displacements.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.areas.iter().map(|(&k, &v)| (k, v))
    }

    /// Offsets in the window, origin excluded, in dx-major order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sum of all areas. Always `(2r + 1)²`.
    pub fn total_area(&self) -> f64 {
        self.areas.values().sum()
    }
}

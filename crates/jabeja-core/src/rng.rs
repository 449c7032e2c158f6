//! Deterministic RNG wrapper, the random source capability and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Substream used when drawing random initial colors.
pub const COLORING_SUBSTREAM: u64 = 1;
/// Substream consumed by the simulation itself (sampling and acceptance draws).
pub const SIMULATION_SUBSTREAM: u64 = 2;

/// Source of uniform randomness consumed by the simulator.
///
/// Every random decision the engine makes goes through this trait, so the
/// order in which call sites draw from it fully determines a run. Tests plug
/// in scripted implementations to make outcomes computable by hand.
pub trait RandomSource {
    /// Draws a uniform integer in `[0, bound)`. `bound` is always positive.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Draws a uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Deterministic RNG handle exposed to simulator consumers.
///
/// The handle is a thin wrapper around `StdRng` that documents the seeding
/// policy used throughout the project. A master `seed: u64` must be provided by
/// the caller. Substreams are derived by hashing `(master_seed, substream_id)`
/// with SipHash-1-3 configured with fixed zero keys, so the coloring draws and
/// the simulation draws never interleave.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a handle for the given substream of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }
}

impl RandomSource for RngHandle {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Random source that replays fixed sequences.
///
/// Index draws cycle through `indices` (reduced modulo the requested bound) and
/// unit draws cycle through `units`. An empty script yields `0` and `0.0`.
/// Used to make sampling and acceptance decisions computable by hand.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    indices: Vec<usize>,
    units: Vec<f64>,
    next_index: usize,
    next_unit: usize,
}

impl ScriptedSource {
    /// Creates a source replaying the given index and unit sequences.
    pub fn new(indices: Vec<usize>, units: Vec<f64>) -> Self {
        Self {
            indices,
            units,
            next_index: 0,
            next_unit: 0,
        }
    }

    /// Number of index draws served so far.
    pub fn index_draws(&self) -> usize {
        self.next_index
    }

    /// Number of unit draws served so far.
    pub fn unit_draws(&self) -> usize {
        self.next_unit
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let value = if self.indices.is_empty() {
            0
        } else {
            self.indices[self.next_index % self.indices.len()] % bound
        };
        self.next_index += 1;
        value
    }

    fn next_unit(&mut self) -> f64 {
        let value = if self.units.is_empty() {
            0.0
        } else {
            self.units[self.next_unit % self.units.len()]
        };
        self.next_unit += 1;
        value
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

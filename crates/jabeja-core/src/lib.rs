#![deny(missing_docs)]
#![doc = "Core identifiers, errors and randomness shared by the Ja-be-Ja simulator crates."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, JabejaError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RandomSource, RngHandle, ScriptedSource};

/// Partition label held by a node. Valid colors lie in `[0, k)`.
pub type Color = u32;

/// Identifier for a node within a colored graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

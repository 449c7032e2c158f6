//! Provenance and schema descriptors attached to run artefacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information recorded alongside every run manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Path of the graph description the run was loaded from, if any.
    pub graph_source: Option<String>,
    /// Canonical hash of the graph structure the run operated on.
    pub graph_hash: String,
    /// Master deterministic seed used for all randomness.
    pub seed: u64,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Creates a provenance record stamped with this crate's version.
    pub fn new(graph_hash: impl Into<String>, seed: u64) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Self {
            graph_source: None,
            graph_hash: graph_hash.into(),
            seed,
            tool_versions,
        }
    }

    /// Records the graph description path.
    pub fn with_graph_source(mut self, source: impl Into<String>) -> Self {
        self.graph_source = Some(source.into());
        self
    }
}

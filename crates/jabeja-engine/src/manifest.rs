use std::fs;
use std::path::{Path, PathBuf};

use jabeja_core::errors::ErrorInfo;
use jabeja_core::{JabejaError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::metrics::RoundMetrics;

/// Summary of a finished run written next to its report files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    /// Manifest layout version.
    pub schema: SchemaVersion,
    /// Configuration the run used.
    pub config: RunConfig,
    /// Seed, graph hash and tool versions.
    pub provenance: RunProvenance,
    /// Edge cut of the initial coloring.
    pub initial_edge_cut: usize,
    /// Metrics of the last round, absent when zero rounds ran.
    pub final_metrics: Option<RoundMetrics>,
    /// Temperature when the run ended.
    pub final_temperature: f64,
    /// Report files, relative to the output directory.
    pub report_files: Vec<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<(), JabejaError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| JabejaError::io("manifest-mkdir", parent, err))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            JabejaError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| JabejaError::io("manifest-write", path, err))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, JabejaError> {
        let contents =
            fs::read_to_string(path).map_err(|err| JabejaError::io("manifest-read", path, err))?;
        serde_json::from_str(&contents).map_err(|err| {
            JabejaError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

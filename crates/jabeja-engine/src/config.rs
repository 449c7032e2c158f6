use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_graph::{InitialColoring, LoadOptions};
use log::warn;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of sweeps over the node set.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Initial temperature `T0`.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Cooling step: subtracted in threshold mode, used as a factor in probabilistic mode.
    #[serde(default = "default_delta")]
    pub delta: f64,
    /// Exponent applied to same-color degrees when scoring a swap.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Where swap candidates are drawn from.
    #[serde(default)]
    pub policy: NodeSelectionPolicy,
    /// Maximum number of neighbors examined per node.
    #[serde(default = "default_neighbor_sample_size")]
    pub neighbor_sample_size: usize,
    /// Number of nodes drawn from the whole population per node.
    #[serde(default = "default_uniform_sample_size")]
    pub uniform_sample_size: usize,
    /// Swap acceptance rule.
    #[serde(default)]
    pub acceptance: AcceptanceMode,
    /// Restore `T0` every this many rounds (0 disables resets).
    #[serde(default)]
    pub reset_interval: usize,
    /// Graph coloring parameters.
    #[serde(default)]
    pub graph: GraphConfig,
    /// Master seed policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output layout.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_rounds() -> usize {
    1000
}

fn default_temperature() -> f64 {
    2.0
}

fn default_delta() -> f64 {
    0.003
}

fn default_alpha() -> f64 {
    2.0
}

fn default_neighbor_sample_size() -> usize {
    3
}

fn default_uniform_sample_size() -> usize {
    6
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            temperature: default_temperature(),
            delta: default_delta(),
            alpha: default_alpha(),
            policy: NodeSelectionPolicy::default(),
            neighbor_sample_size: default_neighbor_sample_size(),
            uniform_sample_size: default_uniform_sample_size(),
            acceptance: AcceptanceMode::default(),
            reset_interval: 0,
            graph: GraphConfig::default(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, JabejaError> {
        let text = fs::read_to_string(path).map_err(|err| JabejaError::io("config-read", path, err))?;
        Self::from_yaml(&text).map_err(|err| match err {
            JabejaError::Serde(info) => {
                JabejaError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses a configuration from YAML text. Missing fields take their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, JabejaError> {
        serde_yaml::from_str(text)
            .map_err(|err| JabejaError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Master seed used for the coloring and simulation substreams.
    pub fn seed(&self) -> u64 {
        self.seed_policy.master_seed
    }

    /// Options handed to the graph loader.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            partitions: self.graph.partitions,
            coloring: self.graph.coloring,
            seed: self.seed(),
        }
    }

    /// Validates the parameters that do not depend on the graph.
    pub fn validate(&self) -> Result<(), JabejaError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(invalid("temperature", "temperature must be positive", self.temperature));
        }
        let floor = self.acceptance.temperature_floor();
        if self.temperature < floor {
            warn!(
                "temperature {} starts below the cooling floor {floor} and will not cool",
                self.temperature
            );
        }
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(invalid("delta", "delta must be non-negative", self.delta));
        }
        if self.acceptance == AcceptanceMode::Probabilistic && (self.delta <= 0.0 || self.delta > 1.0)
        {
            return Err(invalid(
                "delta",
                "probabilistic cooling needs a factor in (0, 1]",
                self.delta,
            ));
        }
        if !self.alpha.is_finite() {
            return Err(invalid("alpha", "alpha must be finite", self.alpha));
        }
        if self.graph.partitions == 0 {
            return Err(JabejaError::Config(ErrorInfo::new(
                "zero-partitions",
                "at least one partition is required",
            )));
        }
        if self.neighbor_sample_size == 0 || self.uniform_sample_size == 0 {
            return Err(JabejaError::Config(
                ErrorInfo::new("zero-sample-size", "sample sizes must be positive")
                    .with_context("neighbor_sample_size", self.neighbor_sample_size.to_string())
                    .with_context("uniform_sample_size", self.uniform_sample_size.to_string()),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str, value: f64) -> JabejaError {
    JabejaError::Config(
        ErrorInfo::new(format!("invalid-{field}"), message).with_context(field, value.to_string()),
    )
}

/// Node-selection policy deciding which candidates a node evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeSelectionPolicy {
    /// Only a sample of direct neighbors.
    Local,
    /// Only a uniform sample of the whole graph.
    Random,
    /// Neighbors first, uniform sample when no neighbor is accepted.
    #[default]
    Hybrid,
}

impl NodeSelectionPolicy {
    /// Whether the policy may draw from the whole population.
    pub fn uses_uniform_sample(&self) -> bool {
        !matches!(self, NodeSelectionPolicy::Local)
    }

    fn as_str(&self) -> &'static str {
        match self {
            NodeSelectionPolicy::Local => "local",
            NodeSelectionPolicy::Random => "random",
            NodeSelectionPolicy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for NodeSelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeSelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(NodeSelectionPolicy::Local),
            "random" => Ok(NodeSelectionPolicy::Random),
            "hybrid" => Ok(NodeSelectionPolicy::Hybrid),
            other => Err(format!(
                "unknown node selection policy `{other}` (expected local, random or hybrid)"
            )),
        }
    }
}

/// Rule used to accept a candidate swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptanceMode {
    /// Accept when `new * T > old`; linear cooling.
    #[default]
    Threshold,
    /// Metropolis acceptance `exp((new - old) / T)`; geometric cooling.
    Probabilistic,
}

impl AcceptanceMode {
    /// Builds the mode from the "use acceptance probability" flag.
    pub fn from_flag(use_acceptance_probability: bool) -> Self {
        if use_acceptance_probability {
            AcceptanceMode::Probabilistic
        } else {
            AcceptanceMode::Threshold
        }
    }

    /// Whether swaps are accepted with a probability.
    pub fn is_probabilistic(&self) -> bool {
        matches!(self, AcceptanceMode::Probabilistic)
    }

    /// Temperature below which cooling stops.
    pub fn temperature_floor(&self) -> f64 {
        match self {
            AcceptanceMode::Threshold => 1.0,
            AcceptanceMode::Probabilistic => 1e-5,
        }
    }
}

/// Coloring parameters forwarded to the graph loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Number of colors `k`.
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    /// Initial coloring policy.
    #[serde(default)]
    pub coloring: InitialColoring,
}

fn default_partitions() -> u32 {
    4
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            partitions: default_partitions(),
            coloring: InitialColoring::default(),
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for report files and the manifest. Created if it does not exist.
    /// No files are written when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Graph description the run was loaded from; only used to name report files.
    #[serde(default)]
    pub graph_source: Option<PathBuf>,
    /// Manifest filename relative to `directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            graph_source: None,
            manifest_file: default_manifest_filename(),
        }
    }
}

#![deny(missing_docs)]

//! Ja-be-Ja partitioning engine: candidate sampling, partner selection,
//! simulated annealing and the round driver with its report sinks.

/// Temperature schedule.
pub mod annealing;
/// YAML configuration schema and defaults.
pub mod config;
/// Round driver and the public `run` entry point.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
/// Edge cut and migration metrics.
pub mod metrics;
/// Swap scoring and acceptance.
pub mod partner;
/// Report sinks for per-round metrics.
pub mod report;
/// Neighbor and uniform candidate samplers.
pub mod sampling;

pub use annealing::Annealer;
pub use config::{
    AcceptanceMode, GraphConfig, NodeSelectionPolicy, OutputConfig, RunConfig, SeedPolicy,
};
pub use kernel::{run, RunSummary, Simulation};
pub use manifest::RunManifest;
pub use metrics::{measure, CutSummary, RoundMetrics};
pub use report::{report_stem, FileReportSink, MemorySink, NullSink, ReportSink};

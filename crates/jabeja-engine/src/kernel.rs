use std::path::PathBuf;

use jabeja_core::rng::SIMULATION_SUBSTREAM;
use jabeja_core::{JabejaError, NodeId, RandomSource, RngHandle, RunProvenance, SchemaVersion};
use jabeja_graph::{canonical_hash, ColoredGraph};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::annealing::Annealer;
use crate::config::RunConfig;
use crate::manifest::RunManifest;
use crate::metrics::{self, RoundMetrics};
use crate::partner;
use crate::report::{self, FileReportSink, NullSink, ReportSink};
use crate::sampling;

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Number of rounds executed.
    pub rounds: usize,
    /// Temperature after the last cooling step.
    pub final_temperature: f64,
    /// Total swaps performed.
    pub total_swaps: u64,
    /// Edge cut of the initial coloring.
    pub initial_edge_cut: usize,
    /// Metrics of the last round, absent when zero rounds ran.
    pub final_metrics: Option<RoundMetrics>,
    /// Metrics of every round in order.
    pub history: Vec<RoundMetrics>,
    /// Report files written during the run.
    pub report_files: Vec<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
}

/// One simulation in progress: the graph, the temperature schedule, the
/// random source and the round counter.
///
/// Nodes are visited in ascending id order and swaps are applied immediately,
/// so later nodes of the same sweep see the updated colors.
pub struct Simulation<R: RandomSource> {
    config: RunConfig,
    graph: ColoredGraph,
    annealer: Annealer,
    rng: R,
    order: Vec<NodeId>,
    round: usize,
    history: Vec<RoundMetrics>,
}

impl<R: RandomSource> Simulation<R> {
    /// Validates `config` against `graph` and prepares round zero.
    pub fn new(config: RunConfig, graph: ColoredGraph, rng: R) -> Result<Self, JabejaError> {
        config.validate()?;
        if config.policy.uses_uniform_sample() {
            if let Some(&first) = graph.node_ids().first() {
                sampling::check_uniform_capacity(
                    graph.node_ids(),
                    first,
                    config.uniform_sample_size,
                )?;
            }
        }
        let annealer = Annealer::new(&config);
        let order = graph.node_ids().to_vec();
        Ok(Self {
            config,
            graph,
            annealer,
            rng,
            order,
            round: 0,
            history: Vec::new(),
        })
    }

    /// Visits every node once, swapping with the selected partner when one is found.
    pub fn sweep(&mut self) -> Result<(), JabejaError> {
        let temperature = self.annealer.temperature();
        for &node in &self.order {
            let selected = partner::select_partner(
                &self.graph,
                node,
                &self.config,
                temperature,
                &mut self.rng,
            )?;
            if let Some(partner) = selected {
                self.graph.swap_colors(node, partner)?;
            }
        }
        Ok(())
    }

    /// Runs exactly one round: sweep, temperature schedule, then reporting.
    pub fn step(&mut self, sink: &mut dyn ReportSink) -> Result<RoundMetrics, JabejaError> {
        self.sweep()?;
        self.annealer.end_of_round(self.round);
        let metrics = RoundMetrics::capture(self.round, &self.graph, self.annealer.temperature());
        info!(
            "round: {}, edge cut: {}, swaps: {}, migrations: {}",
            metrics.round, metrics.edge_cut, metrics.swaps, metrics.migrations
        );
        sink.record(&metrics)?;
        self.history.push(metrics);
        self.round += 1;
        Ok(metrics)
    }

    /// Runs the remaining configured rounds and finishes the sink.
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> Result<&[RoundMetrics], JabejaError> {
        while self.round < self.config.rounds {
            self.step(sink)?;
        }
        sink.finish()?;
        Ok(&self.history)
    }

    /// Index of the next round to execute.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.annealer.temperature()
    }

    /// Current graph state.
    pub fn graph(&self) -> &ColoredGraph {
        &self.graph
    }

    /// Metrics of all completed rounds.
    pub fn history(&self) -> &[RoundMetrics] {
        &self.history
    }
}

/// Runs a full simulation seeded from the configured master seed.
///
/// With an output directory configured the per-round report files and the
/// manifest are written there.
pub fn run(config: &RunConfig, graph: ColoredGraph) -> Result<RunSummary, JabejaError> {
    let seed = config.seed();
    let initial_edge_cut = metrics::measure(&graph).edge_cut;
    let graph_hash = canonical_hash(&graph);
    debug!(
        "starting run: {} nodes, {} edges, initial edge cut {}, seed {seed:#x}",
        graph.len(),
        graph.undirected_edge_count(),
        initial_edge_cut
    );

    let rng = RngHandle::substream(seed, SIMULATION_SUBSTREAM);
    let mut simulation = Simulation::new(config.clone(), graph, rng)?;

    let mut report_files = Vec::new();
    match config.output.directory.as_deref() {
        Some(directory) => {
            let mut sink = FileReportSink::create(directory, &report::report_stem(config))?;
            report_files = sink.paths();
            debug!("writing reports to {}", directory.display());
            simulation.run(&mut sink)?;
        }
        None => {
            simulation.run(&mut NullSink)?;
        }
    }

    let history = simulation.history().to_vec();
    let final_metrics = history.last().copied();
    let final_temperature = simulation.temperature();
    let total_swaps = simulation.graph().swap_count();

    let manifest_path = match config.output.directory.as_deref() {
        Some(directory) => {
            let mut provenance = RunProvenance::new(graph_hash, seed);
            if let Some(source) = &config.output.graph_source {
                provenance = provenance.with_graph_source(source.display().to_string());
            }
            let manifest = RunManifest {
                schema: SchemaVersion::default(),
                config: config.clone(),
                provenance,
                initial_edge_cut,
                final_metrics,
                final_temperature,
                report_files: report_files
                    .iter()
                    .filter_map(|path| path.file_name().map(PathBuf::from))
                    .collect(),
            };
            let path = directory.join(&config.output.manifest_file);
            manifest.write(&path)?;
            Some(path)
        }
        None => None,
    };

    Ok(RunSummary {
        rounds: history.len(),
        final_temperature,
        total_swaps,
        initial_edge_cut,
        final_metrics,
        history,
        report_files,
        manifest_path,
    })
}

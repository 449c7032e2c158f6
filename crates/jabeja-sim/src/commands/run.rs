use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use jabeja_engine::{run as run_simulation, AcceptanceMode, NodeSelectionPolicy, RunConfig};
use jabeja_graph::{load_metis, InitialColoring};
use log::info;
use serde_json::json;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// METIS graph file to partition.
    #[arg(long)]
    pub graph: PathBuf,
    /// YAML configuration; defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for report files and the manifest.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Master seed override.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of rounds override.
    #[arg(long)]
    pub rounds: Option<usize>,
    /// Node selection policy override (local, random, hybrid).
    #[arg(long)]
    pub policy: Option<NodeSelectionPolicy>,
    /// Number of partitions override.
    #[arg(long)]
    pub partitions: Option<u32>,
    /// Initial coloring override (round-robin, random, batch).
    #[arg(long)]
    pub coloring: Option<InitialColoring>,
    /// Accept swaps probabilistically and cool geometrically.
    #[arg(long)]
    pub acceptance_probability: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    config.validate()?;

    let graph = load_metis(&args.graph, &config.load_options())?;
    info!(
        "loaded {}: {} nodes, {} edges",
        args.graph.display(),
        graph.len(),
        graph.undirected_edge_count()
    );

    let summary = run_simulation(&config, graph)?;
    let report = json!({
        "rounds": summary.rounds,
        "initial_edge_cut": summary.initial_edge_cut,
        "final": summary.final_metrics,
        "final_temperature": summary.final_temperature,
        "report_files": summary.report_files,
        "manifest": summary.manifest_path,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Loads the YAML configuration, if any, and applies the command line overrides.
fn resolve_config(args: &RunArgs) -> Result<RunConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed_policy.master_seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(partitions) = args.partitions {
        config.graph.partitions = partitions;
    }
    if let Some(coloring) = args.coloring {
        config.graph.coloring = coloring;
    }
    if args.acceptance_probability {
        config.acceptance = AcceptanceMode::from_flag(args.acceptance_probability);
    }
    if let Some(out) = &args.out {
        config.output.directory = Some(out.clone());
    }
    config.output.graph_source = Some(args.graph.clone());
    Ok(config)
}

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use jabeja_engine::measure;
use jabeja_graph::{canonical_hash, load_metis, InitialColoring, LoadOptions};
use serde_json::{json, Value};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// METIS graph file to inspect.
    #[arg(long)]
    pub graph: PathBuf,
    /// Number of partitions used for the initial coloring.
    #[arg(long, default_value_t = 4)]
    pub partitions: u32,
    /// Initial coloring policy (round-robin, random, batch).
    #[arg(long, default_value_t = InitialColoring::RoundRobin)]
    pub coloring: InitialColoring,
    /// Seed for the random coloring policy.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let report = describe(&args.graph, args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn describe(path: &Path, args: &InspectArgs) -> Result<Value, Box<dyn Error>> {
    let options = LoadOptions {
        partitions: args.partitions,
        coloring: args.coloring,
        seed: args.seed,
    };
    let graph = load_metis(path, &options)?;
    let cut = measure(&graph);
    Ok(json!({
        "graph": path.display().to_string(),
        "nodes": graph.len(),
        "edges": graph.undirected_edge_count(),
        "partitions": args.partitions,
        "coloring": args.coloring.to_string(),
        "initial_edge_cut": cut.edge_cut,
        "graph_hash": canonical_hash(&graph),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn describes_square_graph() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("square.graph");
        fs::write(&path, "4 4\n2 4\n1 3\n2 4\n3 1\n").unwrap();
        let args = InspectArgs {
            graph: path.clone(),
            partitions: 2,
            coloring: InitialColoring::RoundRobin,
            seed: 0,
        };
        let report = describe(&path, &args).unwrap();
        assert_eq!(report["nodes"], 4);
        assert_eq!(report["edges"], 4);
        assert_eq!(report["initial_edge_cut"], 4);
        assert_eq!(report["graph_hash"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.graph");
        let args = InspectArgs {
            graph: path.clone(),
            partitions: 2,
            coloring: InitialColoring::Batch,
            seed: 0,
        };
        assert!(describe(&path, &args).is_err());
    }
}

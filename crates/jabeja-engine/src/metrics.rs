use jabeja_graph::ColoredGraph;
use serde::{Deserialize, Serialize};

/// Per-round metrics emitted to the logger and the report sinks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoundMetrics {
    /// Zero-based index of the completed round.
    pub round: usize,
    /// Number of undirected edges whose endpoints differ in color.
    pub edge_cut: usize,
    /// Cumulative number of swaps since the start of the run.
    pub swaps: u64,
    /// Nodes holding a color other than their initial one.
    pub migrations: usize,
    /// Temperature after the round's cooling step.
    pub temperature: f64,
}

/// Cut statistics of a graph at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSummary {
    /// Ordered (node, neighbor) pairs with differing colors; every cut edge counts twice.
    pub gray_links: usize,
    /// `gray_links / 2`.
    pub edge_cut: usize,
    /// Nodes whose color differs from their initial color.
    pub migrations: usize,
}

/// Computes the cut statistics for the current coloring.
pub fn measure(graph: &ColoredGraph) -> CutSummary {
    let mut gray_links = 0usize;
    let mut migrations = 0usize;
    for node in graph.nodes() {
        if node.has_migrated() {
            migrations += 1;
        }
        for neighbor in node.neighbors() {
            // ids are validated at construction, the lookup cannot miss
            if let Ok(other) = graph.node(*neighbor) {
                if other.color() != node.color() {
                    gray_links += 1;
                }
            }
        }
    }
    CutSummary {
        gray_links,
        edge_cut: gray_links / 2,
        migrations,
    }
}

impl RoundMetrics {
    /// Snapshot of `graph` after `round` completed.
    pub fn capture(round: usize, graph: &ColoredGraph, temperature: f64) -> Self {
        let cut = measure(graph);
        Self {
            round,
            edge_cut: cut.edge_cut,
            swaps: graph.swap_count(),
            migrations: cut.migrations,
            temperature,
        }
    }
}

use sha2::{Digest, Sha256};

use crate::graph::ColoredGraph;

/// Computes the canonical structural hash for the provided graph.
///
/// Only the node set and the undirected edge multiset contribute; colors do
/// not, so the hash identifies the input of a run rather than its state.
pub fn canonical_hash(graph: &ColoredGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.len() as u64).to_le_bytes());
    for id in graph.node_ids() {
        hasher.update(id.as_raw().to_le_bytes());
    }

    let mut edges: Vec<(u64, u64)> = graph
        .nodes()
        .flat_map(|node| {
            let from = node.id().as_raw();
            node.neighbors()
                .iter()
                .map(move |to| (from, to.as_raw()))
                .filter(|(a, b)| a <= b)
        })
        .collect();
    edges.sort_unstable();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

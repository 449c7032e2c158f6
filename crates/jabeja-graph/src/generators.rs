use std::collections::{BTreeMap, BTreeSet};

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{NodeId, RandomSource};

/// Adjacency lists keyed by node id.
pub type Adjacency = BTreeMap<NodeId, Vec<NodeId>>;

/// Builds the cycle `0 - 1 - ... - (n-1) - 0`.
///
/// Graphs with fewer than three nodes degrade to a path so that no self loop or
/// doubled edge is produced.
pub fn ring_adjacency(n_nodes: usize) -> Adjacency {
    let mut adjacency: Adjacency = (0..n_nodes)
        .map(|i| (make_node(i), Vec::with_capacity(2)))
        .collect();
    let edge_count = if n_nodes >= 3 {
        n_nodes
    } else {
        n_nodes.saturating_sub(1)
    };
    for i in 0..edge_count {
        connect(&mut adjacency, make_node(i), make_node((i + 1) % n_nodes));
    }
    adjacency
}

/// Generates a simple undirected graph with `n_nodes` nodes and up to `n_edges`
/// distinct edges drawn uniformly from the random source.
pub fn gen_random_adjacency<R: RandomSource>(
    n_nodes: usize,
    n_edges: usize,
    rng: &mut R,
) -> Result<Adjacency, JabejaError> {
    if n_nodes == 0 {
        return Err(JabejaError::Graph(ErrorInfo::new(
            "empty-graph",
            "random generator requires at least one node",
        )));
    }
    let max_edges = n_nodes * (n_nodes - 1) / 2;
    if n_edges > max_edges {
        return Err(JabejaError::Graph(
            ErrorInfo::new("too-many-edges", "requested more edges than a simple graph holds")
                .with_context("nodes", n_nodes.to_string())
                .with_context("edges", n_edges.to_string()),
        ));
    }

    let mut adjacency: Adjacency = (0..n_nodes).map(|i| (make_node(i), Vec::new())).collect();
    let mut present = BTreeSet::new();
    let max_attempts = n_edges.saturating_mul(64).max(64);
    for _ in 0..max_attempts {
        if present.len() == n_edges {
            break;
        }
        let a = rng.next_index(n_nodes);
        let b = rng.next_index(n_nodes);
        if a == b || !present.insert((a.min(b), a.max(b))) {
            continue;
        }
        connect(&mut adjacency, make_node(a), make_node(b));
    }
    Ok(adjacency)
}

fn connect(adjacency: &mut Adjacency, a: NodeId, b: NodeId) {
    adjacency.entry(a).or_default().push(b);
    adjacency.entry(b).or_default().push(a);
}

fn make_node(index: usize) -> NodeId {
    NodeId::from_raw(index as u64)
}

//! Candidate samplers: a bounded sample of direct neighbors and a bounded
//! uniform sample of the whole population.
//!
//! Both samplers reject duplicates and redraw until the target count is
//! reached, so the number of draws they consume depends on the random source.

use std::collections::BTreeSet;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{NodeId, RandomSource};
use jabeja_graph::Node;

/// Samples up to `sample_size` distinct neighbors of `node`.
///
/// When the node has at most `sample_size` neighbors all of them are returned
/// without consuming randomness. Otherwise uniform indices into the neighbor
/// list are drawn until `sample_size` distinct ids have been collected, capped
/// at the number of distinct neighbors so repeated adjacency entries cannot
/// stall the loop.
pub fn sample_neighbors<R: RandomSource>(
    node: &Node,
    sample_size: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    let neighbors = node.neighbors();
    if neighbors.len() <= sample_size {
        let mut seen = BTreeSet::new();
        return neighbors
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
    }

    let distinct = neighbors.iter().collect::<BTreeSet<_>>().len();
    let target = sample_size.min(distinct);
    let mut chosen = Vec::with_capacity(target);
    while chosen.len() < target {
        let candidate = neighbors[rng.next_index(neighbors.len())];
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    chosen
}

/// Samples `sample_size` distinct ids from `population`, never returning `exclude`.
///
/// `population` is the ascending node-id list of the graph; draws are indices
/// into it. Returns a `Sampling` error instead of looping forever when fewer
/// than `sample_size` eligible ids exist.
pub fn sample_uniform<R: RandomSource>(
    population: &[NodeId],
    exclude: NodeId,
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<NodeId>, JabejaError> {
    check_uniform_capacity(population, exclude, sample_size)?;

    let mut chosen = Vec::with_capacity(sample_size);
    while chosen.len() < sample_size {
        let candidate = population[rng.next_index(population.len())];
        if candidate != exclude && !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    Ok(chosen)
}

/// Checks that `sample_size` distinct ids other than `exclude` can be drawn.
pub fn check_uniform_capacity(
    population: &[NodeId],
    exclude: NodeId,
    sample_size: usize,
) -> Result<(), JabejaError> {
    let eligible = population.len() - usize::from(population.binary_search(&exclude).is_ok());
    if sample_size > eligible {
        return Err(JabejaError::Sampling(
            ErrorInfo::new(
                "uniform-sample-too-large",
                "not enough other nodes to fill the uniform sample",
            )
            .with_context("sample_size", sample_size.to_string())
            .with_context("eligible", eligible.to_string())
            .with_hint("lower uniform_sample_size below the node count"),
        ));
    }
    Ok(())
}

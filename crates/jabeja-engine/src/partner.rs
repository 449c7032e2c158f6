//! Partner selection: scores candidate swaps and applies the acceptance rule.
//!
//! Selection never mutates the graph; the driver applies the returned swap.

use jabeja_core::errors::JabejaError;
use jabeja_core::{NodeId, RandomSource};
use jabeja_graph::{ColoredGraph, Node};

use crate::config::{AcceptanceMode, NodeSelectionPolicy, RunConfig};
use crate::sampling;

/// Degree sums before and after a hypothetical swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapScore {
    /// `d(p, c_p)^α + d(q, c_q)^α` with the current colors.
    pub old_sum: f64,
    /// `d(p, c_q)^α + d(q, c_p)^α` if the colors were exchanged.
    pub new_sum: f64,
}

/// Scores exchanging the colors of `current` and `candidate`.
pub fn score_swap(graph: &ColoredGraph, current: &Node, candidate: &Node, alpha: f64) -> SwapScore {
    let weight = |degree: usize| (degree as f64).powf(alpha);
    let old_sum = weight(graph.degree(current, current.color()))
        + weight(graph.degree(candidate, candidate.color()));
    let new_sum = weight(graph.degree(current, candidate.color()))
        + weight(graph.degree(candidate, current.color()));
    SwapScore { old_sum, new_sum }
}

/// Parameters of the acceptance rule for one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceptance {
    /// Threshold or probabilistic acceptance.
    pub mode: AcceptanceMode,
    /// Degree weighting exponent.
    pub alpha: f64,
    /// Current temperature.
    pub temperature: f64,
}

impl Acceptance {
    /// Acceptance parameters for `config` at `temperature`.
    pub fn new(config: &RunConfig, temperature: f64) -> Self {
        Self {
            mode: config.acceptance,
            alpha: config.alpha,
            temperature,
        }
    }

    /// Metropolis probability of accepting a swap with the given score.
    pub fn probability(&self, score: SwapScore) -> f64 {
        ((score.new_sum - score.old_sum) / self.temperature).exp()
    }
}

/// Returns the best acceptable partner for `node` among `candidates`.
///
/// Only candidates holding a different color are scored. A candidate must pass
/// the acceptance rule and beat the best `new_sum` seen so far (starting at
/// zero); the best one wins. Probabilistic mode draws one unit value per scored
/// candidate.
pub fn find_partner<R: RandomSource>(
    graph: &ColoredGraph,
    node: NodeId,
    candidates: &[NodeId],
    acceptance: &Acceptance,
    rng: &mut R,
) -> Result<Option<NodeId>, JabejaError> {
    let current = graph.node(node)?;
    let mut best_sum = 0.0;
    let mut best = None;

    for &candidate_id in candidates {
        let candidate = graph.node(candidate_id)?;
        if candidate.color() == current.color() {
            continue;
        }
        let score = score_swap(graph, current, candidate, acceptance.alpha);
        let accepted = match acceptance.mode {
            AcceptanceMode::Threshold => score.new_sum * acceptance.temperature > score.old_sum,
            AcceptanceMode::Probabilistic => rng.next_unit() < acceptance.probability(score),
        };
        if accepted && score.new_sum > best_sum {
            best = Some(candidate_id);
            best_sum = score.new_sum;
        }
    }

    Ok(best)
}

/// Samples candidates for `node` according to the configured policy and picks
/// a partner among them.
pub fn select_partner<R: RandomSource>(
    graph: &ColoredGraph,
    node: NodeId,
    config: &RunConfig,
    temperature: f64,
    rng: &mut R,
) -> Result<Option<NodeId>, JabejaError> {
    let acceptance = Acceptance::new(config, temperature);

    let mut partner = None;
    if matches!(
        config.policy,
        NodeSelectionPolicy::Local | NodeSelectionPolicy::Hybrid
    ) {
        let candidates =
            sampling::sample_neighbors(graph.node(node)?, config.neighbor_sample_size, rng);
        partner = find_partner(graph, node, &candidates, &acceptance, rng)?;
    }

    if partner.is_none() && config.policy.uses_uniform_sample() {
        let candidates =
            sampling::sample_uniform(graph.node_ids(), node, config.uniform_sample_size, rng)?;
        partner = find_partner(graph, node, &candidates, &acceptance, rng)?;
    }

    Ok(partner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jabeja_core::ScriptedSource;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    /// `p(0) - q(1)` with `x(0)` hanging off p and `y(1)` off q: swapping p and q
    /// leaves both degree sums at 2.
    fn neutral_pair() -> ColoredGraph {
        ColoredGraph::new(vec![
            Node::new(n(0), 0, vec![n(1), n(2)]),
            Node::new(n(1), 1, vec![n(0), n(3)]),
            Node::new(n(2), 0, vec![n(0)]),
            Node::new(n(3), 1, vec![n(1)]),
        ])
        .unwrap()
    }

    fn threshold(temperature: f64) -> Acceptance {
        Acceptance {
            mode: AcceptanceMode::Threshold,
            alpha: 1.0,
            temperature,
        }
    }

    #[test]
    fn neutral_swap_scores_equal_sums() {
        let graph = neutral_pair();
        let score = score_swap(
            &graph,
            graph.node(n(0)).unwrap(),
            graph.node(n(1)).unwrap(),
            1.0,
        );
        assert_eq!(score, SwapScore { old_sum: 2.0, new_sum: 2.0 });
    }

    #[test]
    fn threshold_requires_strict_improvement() {
        let graph = neutral_pair();
        let mut rng = ScriptedSource::default();
        let at_one = find_partner(&graph, n(0), &[n(1)], &threshold(1.0), &mut rng).unwrap();
        assert_eq!(at_one, None);
        let warm = find_partner(&graph, n(0), &[n(1)], &threshold(1.5), &mut rng).unwrap();
        assert_eq!(warm, Some(n(1)));
        assert_eq!(rng.unit_draws(), 0);
    }

    #[test]
    fn same_color_candidates_are_ignored() {
        let graph = neutral_pair();
        let mut rng = ScriptedSource::default();
        let partner = find_partner(&graph, n(0), &[n(2)], &threshold(10.0), &mut rng).unwrap();
        assert_eq!(partner, None);
    }

    #[test]
    fn best_new_sum_wins_over_first_acceptable() {
        // Node 0 (color 0) is surrounded by color 1; candidate 4 has more
        // color-0 neighbors than candidate 1, so its swap scores higher.
        let graph = ColoredGraph::new(vec![
            Node::new(n(0), 0, vec![n(1), n(2)]),
            Node::new(n(1), 1, vec![n(0)]),
            Node::new(n(2), 1, vec![n(0), n(4)]),
            Node::new(n(3), 0, vec![n(4)]),
            Node::new(n(4), 1, vec![n(2), n(3), n(5)]),
            Node::new(n(5), 0, vec![n(4)]),
        ])
        .unwrap();
        let mut rng = ScriptedSource::default();
        let partner =
            find_partner(&graph, n(0), &[n(1), n(4)], &threshold(2.0), &mut rng).unwrap();
        assert_eq!(partner, Some(n(4)));
    }

    #[test]
    fn probabilistic_mode_uses_one_draw_per_scored_candidate() {
        let graph = neutral_pair();
        let acceptance = Acceptance {
            mode: AcceptanceMode::Probabilistic,
            alpha: 1.0,
            temperature: 1.0,
        };
        // exp(0) == 1, so any draw below one accepts the neutral swap.
        let mut rng = ScriptedSource::new(vec![], vec![0.999]);
        let partner = find_partner(&graph, n(0), &[n(2), n(1)], &acceptance, &mut rng).unwrap();
        assert_eq!(partner, Some(n(1)));
        assert_eq!(rng.unit_draws(), 1);
    }

    #[test]
    fn probabilistic_mode_rejects_unlucky_worsening_swaps() {
        // p(0) and q(1) are each embedded in their own color; swapping costs 4.
        let graph = ColoredGraph::new(vec![
            Node::new(n(0), 0, vec![n(2), n(3), n(1)]),
            Node::new(n(1), 1, vec![n(4), n(5), n(0)]),
            Node::new(n(2), 0, vec![n(0)]),
            Node::new(n(3), 0, vec![n(0)]),
            Node::new(n(4), 1, vec![n(1)]),
            Node::new(n(5), 1, vec![n(1)]),
        ])
        .unwrap();
        let acceptance = Acceptance {
            mode: AcceptanceMode::Probabilistic,
            alpha: 1.0,
            temperature: 1.0,
        };
        let score = score_swap(&graph, graph.node(n(0)).unwrap(), graph.node(n(1)).unwrap(), 1.0);
        assert_eq!(score, SwapScore { old_sum: 4.0, new_sum: 2.0 });
        let p = acceptance.probability(score);

        let mut unlucky = ScriptedSource::new(vec![], vec![p + 0.01]);
        assert_eq!(
            find_partner(&graph, n(0), &[n(1)], &acceptance, &mut unlucky).unwrap(),
            None
        );
        let mut lucky = ScriptedSource::new(vec![], vec![p / 2.0]);
        assert_eq!(
            find_partner(&graph, n(0), &[n(1)], &acceptance, &mut lucky).unwrap(),
            Some(n(1))
        );
    }

    #[test]
    fn hybrid_falls_back_to_uniform_sample() {
        // Node 0's only neighbor shares its color; node 3 is a distant partner.
        let graph = ColoredGraph::new(vec![
            Node::new(n(0), 0, vec![n(1)]),
            Node::new(n(1), 0, vec![n(0), n(2)]),
            Node::new(n(2), 1, vec![n(1), n(3)]),
            Node::new(n(3), 1, vec![n(2)]),
        ])
        .unwrap();
        let config = RunConfig {
            policy: NodeSelectionPolicy::Hybrid,
            alpha: 1.0,
            uniform_sample_size: 1,
            ..RunConfig::default()
        };
        let mut rng = ScriptedSource::new(vec![2], vec![]);
        let partner = select_partner(&graph, n(0), &config, 3.0, &mut rng).unwrap();
        assert_eq!(partner, Some(n(2)));
        assert_eq!(rng.index_draws(), 1);

        let local = RunConfig {
            policy: NodeSelectionPolicy::Local,
            ..config
        };
        let mut rng = ScriptedSource::new(vec![2], vec![]);
        assert_eq!(select_partner(&graph, n(0), &local, 3.0, &mut rng).unwrap(), None);
        assert_eq!(rng.index_draws(), 0);
    }
}

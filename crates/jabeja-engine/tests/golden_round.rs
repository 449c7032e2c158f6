use jabeja_core::{NodeId, RandomSource, RngHandle, ScriptedSource};
use jabeja_engine::{
    measure, AcceptanceMode, MemorySink, NodeSelectionPolicy, RunConfig, Simulation,
};
use jabeja_graph::{gen_random_adjacency, ring_adjacency, ColoredGraph, InitialColoring, Node};

fn n(raw: u64) -> NodeId {
    NodeId::from_raw(raw)
}

/// Two triangles `0-1-2` and `3-4-5` bridged by `2-3`, alternately colored.
fn bridged_triangles() -> ColoredGraph {
    ColoredGraph::new(vec![
        Node::new(n(0), 0, vec![n(1), n(2)]),
        Node::new(n(1), 1, vec![n(0), n(2)]),
        Node::new(n(2), 0, vec![n(1), n(0), n(3)]),
        Node::new(n(3), 1, vec![n(4), n(5), n(2)]),
        Node::new(n(4), 0, vec![n(3), n(5)]),
        Node::new(n(5), 1, vec![n(4), n(3)]),
    ])
    .unwrap()
}

fn local_threshold() -> RunConfig {
    RunConfig {
        rounds: 1,
        temperature: 2.0,
        delta: 0.5,
        alpha: 1.0,
        policy: NodeSelectionPolicy::Local,
        neighbor_sample_size: 3,
        acceptance: AcceptanceMode::Threshold,
        ..RunConfig::default()
    }
}

#[test]
fn one_threshold_round_matches_recorded_tuple() {
    let graph = bridged_triangles();
    assert_eq!(measure(&graph).edge_cut, 5);

    let mut simulation =
        Simulation::new(local_threshold(), graph, ScriptedSource::default()).unwrap();
    let mut sink = MemorySink::new();
    let metrics = simulation.step(&mut sink).unwrap();

    assert_eq!(metrics.round, 0);
    assert_eq!(
        (metrics.edge_cut, metrics.swaps, metrics.migrations),
        (4, 6, 4)
    );
    assert!((simulation.temperature() - 1.5).abs() < 1e-12);
    assert_eq!(simulation.round(), 1);
    assert_eq!(sink.rows(), &[metrics]);

    let colors: Vec<_> = simulation.graph().nodes().map(|node| node.color()).collect();
    assert_eq!(colors, vec![0, 0, 1, 1, 1, 0]);
}

#[test]
fn sampled_hybrid_round_matches_recorded_tuple() {
    // Nodes 2 and 3 have three neighbors but only two are sampled:
    // node 2 draws [2, 2, 0] -> {3, 1}, node 3 draws [1, 1, 2] -> {5, 2}.
    let config = RunConfig {
        policy: NodeSelectionPolicy::Hybrid,
        neighbor_sample_size: 2,
        uniform_sample_size: 1,
        ..local_threshold()
    };
    let script = ScriptedSource::new(vec![2, 2, 0, 1, 1, 2], vec![]);
    let mut simulation = Simulation::new(config, bridged_triangles(), script).unwrap();
    let metrics = simulation.step(&mut MemorySink::new()).unwrap();

    assert_eq!(
        (metrics.edge_cut, metrics.swaps, metrics.migrations),
        (5, 6, 2)
    );
    let colors: Vec<_> = simulation.graph().nodes().map(|node| node.color()).collect();
    assert_eq!(colors, vec![0, 1, 1, 0, 0, 1]);
}

/// Passes draws through from a seeded handle and keeps a copy of each.
struct Recording {
    inner: RngHandle,
    indices: Vec<usize>,
    units: Vec<f64>,
}

impl RandomSource for Recording {
    fn next_index(&mut self, bound: usize) -> usize {
        let value = self.inner.next_index(bound);
        self.indices.push(value);
        value
    }

    fn next_unit(&mut self) -> f64 {
        let value = self.inner.next_unit();
        self.units.push(value);
        value
    }
}

#[test]
fn seeded_run_is_fully_determined_by_its_draws() {
    let mut rng = RngHandle::from_seed(5);
    let adjacency = gen_random_adjacency(24, 48, &mut rng).unwrap();
    let graph =
        ColoredGraph::with_coloring(adjacency, InitialColoring::Random, 3, &mut rng).unwrap();
    let config = RunConfig {
        rounds: 4,
        temperature: 1.0,
        delta: 0.9,
        policy: NodeSelectionPolicy::Hybrid,
        neighbor_sample_size: 2,
        acceptance: AcceptanceMode::Probabilistic,
        ..RunConfig::default()
    };

    let mut recorded = Recording {
        inner: RngHandle::from_seed(2024),
        indices: Vec::new(),
        units: Vec::new(),
    };
    let seeded_history = Simulation::new(config.clone(), graph.clone(), &mut recorded)
        .unwrap()
        .run(&mut MemorySink::new())
        .unwrap()
        .to_vec();

    let mut again =
        Simulation::new(config.clone(), graph.clone(), RngHandle::from_seed(2024)).unwrap();
    assert_eq!(again.run(&mut MemorySink::new()).unwrap(), seeded_history.as_slice());

    assert!(!recorded.indices.is_empty());
    assert!(!recorded.units.is_empty());
    let replay = ScriptedSource::new(recorded.indices.clone(), recorded.units.clone());
    let mut replayed = Simulation::new(config, graph, replay).unwrap();
    assert_eq!(replayed.run(&mut MemorySink::new()).unwrap(), seeded_history.as_slice());
}

#[test]
fn alternating_ring_starts_fully_cut() {
    let mut rng = ScriptedSource::default();
    let graph =
        ColoredGraph::with_coloring(ring_adjacency(4), InitialColoring::RoundRobin, 2, &mut rng)
            .unwrap();
    let cut = measure(&graph);
    assert_eq!(cut.edge_cut, 4);
    assert_eq!(cut.migrations, 0);
}

#[test]
fn run_stops_after_configured_rounds() {
    let config = RunConfig {
        rounds: 5,
        ..local_threshold()
    };
    let mut simulation =
        Simulation::new(config, bridged_triangles(), ScriptedSource::default()).unwrap();
    let mut sink = MemorySink::new();
    let history = simulation.run(&mut sink).unwrap().to_vec();

    let rounds: Vec<_> = history.iter().map(|row| row.round).collect();
    assert_eq!(rounds, vec![0, 1, 2, 3, 4]);
    assert_eq!(sink.rows(), history.as_slice());
    // The floor stops cooling, not the loop.
    assert_eq!(simulation.temperature(), 1.0);
    for pair in history.windows(2) {
        assert!(pair[1].swaps >= pair[0].swaps);
    }
}

#[test]
fn oversized_uniform_sample_fails_before_any_round() {
    let config = RunConfig {
        policy: NodeSelectionPolicy::Hybrid,
        uniform_sample_size: 6,
        ..local_threshold()
    };
    let err = Simulation::new(config, bridged_triangles(), ScriptedSource::default())
        .err()
        .unwrap();
    assert_eq!(err.info().code, "uniform-sample-too-large");
}

#[test]
fn invalid_config_is_rejected() {
    let config = RunConfig {
        delta: -0.5,
        ..local_threshold()
    };
    let err = Simulation::new(config, bridged_triangles(), ScriptedSource::default())
        .err()
        .unwrap();
    assert_eq!(err.info().code, "invalid-delta");
}

#[test]
fn temperature_below_floor_is_held() {
    let config = RunConfig {
        rounds: 3,
        temperature: 0.5,
        ..local_threshold()
    };
    let mut simulation =
        Simulation::new(config, bridged_triangles(), ScriptedSource::default()).unwrap();
    let history = simulation.run(&mut MemorySink::new()).unwrap().to_vec();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|row| row.temperature == 0.5));
    assert_eq!(simulation.temperature(), 0.5);
}

#[test]
fn engine_types_are_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Simulation<jabeja_core::RngHandle>>();
    assert_send::<jabeja_engine::FileReportSink>();
    assert_send::<ColoredGraph>();
}

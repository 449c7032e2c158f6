use std::collections::BTreeMap;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::{Color, NodeId, RandomSource};

use crate::coloring::InitialColoring;
use crate::generators::Adjacency;
use crate::node::Node;

/// Node registry holding colors and adjacency.
///
/// Nodes are kept ordered by ascending id; that order is the sweep order of the
/// simulation and the index space of uniform sampling. The node set and the
/// adjacency lists are fixed after construction.
#[derive(Debug, Clone)]
pub struct ColoredGraph {
    nodes: BTreeMap<NodeId, Node>,
    ids: Vec<NodeId>,
    swaps: u64,
}

impl ColoredGraph {
    /// Builds a graph from explicit nodes.
    ///
    /// Fails when two nodes share an id or when a neighbor list references an
    /// id that is not part of the graph. Symmetry is not checked here, see
    /// [`ColoredGraph::check_symmetric`].
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self, JabejaError> {
        let mut registry = BTreeMap::new();
        for node in nodes {
            let id = node.id();
            if registry.insert(id, node).is_some() {
                return Err(JabejaError::Graph(
                    ErrorInfo::new("duplicate-node", "node id appears more than once")
                        .with_context("node", id.to_string()),
                ));
            }
        }
        for node in registry.values() {
            if let Some(missing) = node
                .neighbors()
                .iter()
                .find(|neighbor| !registry.contains_key(neighbor))
            {
                return Err(JabejaError::Graph(
                    ErrorInfo::new("unknown-neighbor", "neighbor id is not part of the graph")
                        .with_context("node", node.id().to_string())
                        .with_context("neighbor", missing.to_string()),
                ));
            }
        }
        let ids = registry.keys().copied().collect();
        Ok(Self {
            nodes: registry,
            ids,
            swaps: 0,
        })
    }

    /// Builds a graph from an adjacency map, coloring nodes with `coloring`.
    pub fn with_coloring<R: RandomSource>(
        adjacency: Adjacency,
        coloring: InitialColoring,
        partitions: u32,
        rng: &mut R,
    ) -> Result<Self, JabejaError> {
        let ids: Vec<NodeId> = adjacency.keys().copied().collect();
        let colors = coloring.assign(ids.len(), partitions, rng)?;
        let nodes = adjacency
            .into_iter()
            .zip(colors)
            .map(|((id, neighbors), color)| Node::new(id, color, neighbors));
        Self::new(nodes)
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node identifiers in ascending order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Iterates over nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node, JabejaError> {
        self.nodes.get(&id).ok_or_else(|| unknown_node(id))
    }

    /// Returns the current color of `id`.
    pub fn color_of(&self, id: NodeId) -> Result<Color, JabejaError> {
        self.node(id).map(Node::color)
    }

    /// Counts the neighbors of `node` that currently hold `color`.
    pub fn degree(&self, node: &Node, color: Color) -> usize {
        node.neighbors()
            .iter()
            .filter(|neighbor| {
                self.nodes
                    .get(neighbor)
                    .is_some_and(|record| record.color() == color)
            })
            .count()
    }

    /// Exchanges the colors of `a` and `b` and bumps the swap counter.
    ///
    /// Applying the same swap twice restores both colors.
    pub fn swap_colors(&mut self, a: NodeId, b: NodeId) -> Result<(), JabejaError> {
        let color_a = self.color_of(a)?;
        let color_b = self.color_of(b)?;
        if let Some(node) = self.nodes.get_mut(&a) {
            node.set_color(color_b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.set_color(color_a);
        }
        self.swaps += 1;
        Ok(())
    }

    /// Cumulative number of swaps applied since construction.
    pub fn swap_count(&self) -> u64 {
        self.swaps
    }

    /// Number of undirected edges, counting each adjacency pair once.
    pub fn undirected_edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors().len()).sum::<usize>() / 2
    }

    /// Verifies that every adjacency entry is mirrored by its neighbor.
    pub fn check_symmetric(&self) -> Result<(), JabejaError> {
        for node in self.nodes.values() {
            for neighbor in node.neighbors() {
                let mirrored = self
                    .nodes
                    .get(neighbor)
                    .is_some_and(|other| other.neighbors().contains(&node.id()));
                if !mirrored {
                    return Err(JabejaError::Graph(
                        ErrorInfo::new(
                            "asymmetric-adjacency",
                            "neighbor does not list the node back",
                        )
                        .with_context("node", node.id().to_string())
                        .with_context("neighbor", neighbor.to_string())
                        .with_hint("the simulator expects an undirected graph"),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn unknown_node(id: NodeId) -> JabejaError {
    JabejaError::Graph(
        ErrorInfo::new("unknown-node", "node id is not part of the graph")
            .with_context("node", id.to_string()),
    )
}

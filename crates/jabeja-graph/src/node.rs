use jabeja_core::{Color, NodeId};
use serde::{Deserialize, Serialize};

/// A vertex of the colored graph.
///
/// The initial color is captured at construction and never changes; the
/// current color is only rewritten by [`ColoredGraph::swap_colors`](crate::ColoredGraph::swap_colors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    color: Color,
    initial_color: Color,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node holding `color`, which also becomes its initial color.
    ///
    /// Neighbor order is preserved and duplicates are kept as given.
    pub fn new(id: NodeId, color: Color, neighbors: Vec<NodeId>) -> Self {
        Self {
            id,
            color,
            initial_color: color,
            neighbors,
        }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the color currently held by the node.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the color assigned when the graph was built.
    pub fn initial_color(&self) -> Color {
        self.initial_color
    }

    /// Returns the ordered neighbor list.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether the node currently holds a color other than its initial one.
    pub fn has_migrated(&self) -> bool {
        self.color != self.initial_color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

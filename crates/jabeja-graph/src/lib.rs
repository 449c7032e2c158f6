#![deny(missing_docs)]

//! Colored undirected graph model for the Ja-be-Ja simulator.
//!
//! The graph is built once (from a METIS file, a generator or explicit nodes)
//! and afterwards only node colors change, exclusively through
//! [`ColoredGraph::swap_colors`].

mod coloring;
mod generators;
mod graph;
mod hash;
mod metis;
mod node;

pub use coloring::InitialColoring;
pub use generators::{gen_random_adjacency, ring_adjacency, Adjacency};
pub use graph::ColoredGraph;
pub use hash::canonical_hash;
pub use metis::{graph_from_metis_str, load_metis, parse_metis, LoadOptions};
pub use node::Node;

use std::fs;
use std::path::Path;

use jabeja_core::errors::{ErrorInfo, JabejaError};
use jabeja_core::rng::COLORING_SUBSTREAM;
use jabeja_core::{NodeId, RngHandle};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::coloring::InitialColoring;
use crate::generators::Adjacency;
use crate::graph::ColoredGraph;

/// Options applied when turning a graph description into a colored graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Number of colors `k`.
    pub partitions: u32,
    /// Initial color assignment policy.
    pub coloring: InitialColoring,
    /// Master seed; the coloring substream is derived from it.
    pub seed: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            partitions: 4,
            coloring: InitialColoring::RoundRobin,
            seed: 0,
        }
    }
}

/// Parses an unweighted METIS graph into adjacency lists.
///
/// Node ids are the 1-based line numbers of the node records. `%` lines are
/// comments; an empty record is an isolated node.
pub fn parse_metis(text: &str) -> Result<Adjacency, JabejaError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.starts_with('%'));

    let (header_line, header) = lines
        .by_ref()
        .find(|(_, line)| !line.is_empty())
        .ok_or_else(|| {
            JabejaError::Serde(parse_error("missing-header", "graph description is empty", 0))
        })?;
    let (node_count, declared_edges) = parse_header(header, header_line)?;

    let mut adjacency = Adjacency::new();
    for index in 1..=node_count {
        let (line_no, record) = lines.next().ok_or_else(|| {
            JabejaError::Serde(
                parse_error("truncated", "fewer node records than declared", header_line)
                    .with_context("expected", node_count.to_string())
                    .with_context("found", (index - 1).to_string()),
            )
        })?;
        let mut neighbors = Vec::new();
        for token in record.split_whitespace() {
            let raw: u64 = token.parse().map_err(|_| {
                JabejaError::Serde(
                    parse_error("bad-neighbor", "neighbor id is not an integer", line_no)
                        .with_context("token", token),
                )
            })?;
            if raw == 0 || raw > node_count as u64 {
                return Err(JabejaError::Serde(
                    parse_error("neighbor-out-of-range", "neighbor id outside 1..=n", line_no)
                        .with_context("neighbor", raw.to_string()),
                ));
            }
            if raw == index as u64 {
                return Err(JabejaError::Serde(
                    parse_error("self-loop", "node lists itself as a neighbor", line_no)
                        .with_context("node", raw.to_string()),
                ));
            }
            neighbors.push(NodeId::from_raw(raw));
        }
        adjacency.insert(NodeId::from_raw(index as u64), neighbors);
    }

    if let Some((line_no, _)) = lines.find(|(_, line)| !line.is_empty()) {
        return Err(JabejaError::Serde(parse_error(
            "trailing-data",
            "more node records than declared",
            line_no,
        )));
    }

    let entries: usize = adjacency.values().map(Vec::len).sum();
    if Some(entries) != declared_edges.checked_mul(2) {
        warn!(
            "metis header declares {declared_edges} edges but adjacency lists hold {} entries",
            entries
        );
    }
    Ok(adjacency)
}

/// Parses METIS text and colors the resulting graph.
pub fn graph_from_metis_str(text: &str, options: &LoadOptions) -> Result<ColoredGraph, JabejaError> {
    let adjacency = parse_metis(text)?;
    let mut rng = RngHandle::substream(options.seed, COLORING_SUBSTREAM);
    let graph =
        ColoredGraph::with_coloring(adjacency, options.coloring, options.partitions, &mut rng)?;
    graph.check_symmetric()?;
    debug!(
        "loaded graph with {} nodes and {} edges ({} coloring, k = {})",
        graph.len(),
        graph.undirected_edge_count(),
        options.coloring,
        options.partitions
    );
    Ok(graph)
}

/// Reads a METIS file from disk and colors it.
pub fn load_metis(path: &Path, options: &LoadOptions) -> Result<ColoredGraph, JabejaError> {
    let text = fs::read_to_string(path).map_err(|err| JabejaError::io("graph-read", path, err))?;
    graph_from_metis_str(&text, options).map_err(|err| match err {
        JabejaError::Serde(info) => {
            JabejaError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

fn parse_header(header: &str, line_no: usize) -> Result<(usize, usize), JabejaError> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if !(2..=3).contains(&tokens.len()) {
        return Err(JabejaError::Serde(
            parse_error("bad-header", "header must be `n m [fmt]`", line_no)
                .with_context("header", header),
        ));
    }
    let parse_count = |token: &str| {
        token.parse::<usize>().map_err(|_| {
            JabejaError::Serde(
                parse_error("bad-header", "header counts must be integers", line_no)
                    .with_context("token", token),
            )
        })
    };
    let nodes = parse_count(tokens[0])?;
    let edges = parse_count(tokens[1])?;
    if edges.checked_mul(2).is_none() {
        return Err(JabejaError::Serde(
            parse_error("bad-header", "declared edge count is too large", line_no)
                .with_context("edges", tokens[1]),
        ));
    }
    if let Some(fmt) = tokens.get(2) {
        if fmt.chars().any(|c| c != '0') {
            return Err(JabejaError::Serde(
                parse_error("weighted-graph", "weighted METIS graphs are not supported", line_no)
                    .with_context("fmt", *fmt),
            ));
        }
    }
    Ok((nodes, edges))
}

fn parse_error(code: &str, message: &str, line_no: usize) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("line", line_no.to_string())
}

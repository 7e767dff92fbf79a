//! Structural algorithms over [`Graph`]: connectivity, cycles, ordering,
//! levels, advisory validation and summary statistics.
//!
//! Everything here is read-only and iterates nodes in insertion order, so
//! results are deterministic for a fixed construction order.

mod cycles;
mod levels;
mod validate;

pub use cycles::*;
pub use levels::*;
pub use validate::*;

pub(crate) use levels::level_positions;

use crate::graph::Graph;
use serde::Serialize;
use std::collections::VecDeque;

/// True when every node can reach every other node ignoring edge direction.
/// An empty graph is not considered connected.
pub fn is_weakly_connected(graph: &Graph) -> bool {
    let n = graph.node_count();
    if n == 0 {
        return false;
    }
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    let mut reached = 1;
    while let Some(current) = queue.pop_front() {
        let neighbours = graph
            .successor_positions(current)
            .chain(graph.predecessor_positions(current));
        for next in neighbours {
            if !seen[next] {
                seen[next] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
    }
    reached == n
}

/// Kahn's algorithm. Ready nodes are taken in insertion order; returns `None`
/// when the graph has a cycle.
pub fn topological_sort(graph: &Graph) -> Option<Vec<String>> {
    let n = graph.node_count();
    let mut pending: Vec<usize> = (0..n)
        .map(|p| graph.predecessor_positions(p).count())
        .collect();
    let mut ready: VecDeque<usize> = (0..n).filter(|&p| pending[p] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(current) = ready.pop_front() {
        order.push(current);
        for next in graph.successor_positions(current) {
            pending[next] -= 1;
            if pending[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    (order.len() == n).then(|| {
        order
            .into_iter()
            .map(|p| graph.node_at(p).id().to_string())
            .collect()
    })
}

pub fn has_cycle(graph: &Graph) -> bool {
    topological_sort(graph).is_none()
}

/// Summary figures for a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
    pub is_connected: bool,
    pub num_cycles: usize,
    /// `edges / (nodes * (nodes - 1))`, zero for fewer than two nodes.
    pub density: f64,
}

pub fn statistics(graph: &Graph) -> GraphStatistics {
    let n = graph.node_count();
    let e = graph.edge_count();
    let density = if n > 1 {
        e as f64 / (n * (n - 1)) as f64
    } else {
        0.0
    };
    GraphStatistics {
        num_nodes: n,
        num_edges: e,
        is_dag: !has_cycle(graph),
        is_connected: is_weakly_connected(graph),
        num_cycles: simple_cycles(graph).len(),
        density,
    }
}

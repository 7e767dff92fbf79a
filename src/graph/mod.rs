//! The flow-graph intermediate representation shared by every pipeline stage.
//!
//! Nodes keep their insertion order, which is significant: generators emit
//! declarations in that order and every algorithm in [`crate::analysis`]
//! iterates it, so output is deterministic for a fixed construction order.

pub mod edge;
pub mod neutral;
pub mod node;

pub use edge::*;
pub use neutral::*;
pub use node::*;

use crate::error::GraphError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A directed graph with typed, labeled nodes and labeled edges.
///
/// Every edge references nodes that exist in the graph. Parallel edges with
/// the same `(source, target)` pair are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "NeutralGraph", try_from = "NeutralGraph")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Index: node id -> position in `nodes`
    index: AHashMap<String, usize>,
    /// Index: node position -> outgoing edge positions, in insertion order
    outgoing: Vec<Vec<usize>>,
    /// Index: node position -> incoming edge positions, in insertion order
    incoming: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().to_string()));
        }
        self.index.insert(node.id().to_string(), self.nodes.len());
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(())
    }

    /// Appends an edge and returns its position in the edge list.
    pub fn add_edge(&mut self, edge: Edge) -> Result<usize, GraphError> {
        let (Some(&src), Some(&dst)) = (self.index.get(edge.source()), self.index.get(edge.target()))
        else {
            return Err(GraphError::DanglingEdge {
                source_id: edge.source().to_string(),
                target_id: edge.target().to_string(),
            });
        };
        let position = self.edges.len();
        self.edges.push(edge);
        self.outgoing[src].push(position);
        self.incoming[dst].push(position);
        Ok(position)
    }

    /// Shorthand for adding an unlabeled edge.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<usize, GraphError> {
        self.add_edge(Edge::new(source, target))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.index.get(id).map(|&i| &mut self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut()
    }

    pub fn edge_mut(&mut self, position: usize) -> Option<&mut Edge> {
        self.edges.get_mut(position)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Positions of the edges leaving `id`, in insertion order.
    pub fn outgoing_edges(&self, id: &str) -> &[usize] {
        self.index
            .get(id)
            .map(|&i| self.outgoing[i].as_slice())
            .unwrap_or(&[])
    }

    /// Positions of the edges entering `id`, in insertion order.
    pub fn incoming_edges(&self, id: &str) -> &[usize] {
        self.index
            .get(id)
            .map(|&i| self.incoming[i].as_slice())
            .unwrap_or(&[])
    }

    /// Targets of the edges leaving `id`, one entry per edge.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.outgoing_edges(id)
            .iter()
            .map(|&e| self.edges[e].target())
            .collect()
    }

    /// Sources of the edges entering `id`, one entry per edge.
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.incoming_edges(id)
            .iter()
            .map(|&e| self.edges[e].source())
            .collect()
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing_edges(id).len()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming_edges(id).len()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.is(kind)).count()
    }

    /// Converts to the neutral `{nodes, edges}` form.
    pub fn to_neutral(&self) -> NeutralGraph {
        NeutralGraph::from(self)
    }

    /// Rebuilds a graph from the neutral form, checking every edge endpoint.
    pub fn from_neutral(neutral: NeutralGraph) -> Result<Self, GraphError> {
        Graph::try_from(neutral)
    }

    /// Unites two graphs. When both contain a node id, the node from `other`
    /// replaces the attributes of the existing one but keeps its position in
    /// the ordering. All edges of both graphs are kept.
    pub fn merge(mut self, other: Graph) -> Result<Graph, GraphError> {
        let Graph { nodes, edges, .. } = other;
        for node in nodes {
            match self.position_of(node.id()) {
                Some(i) => self.nodes[i] = node,
                None => self.add_node(node)?,
            }
        }
        for edge in edges {
            self.add_edge(edge)?;
        }
        Ok(self)
    }

    // Position-based accessors for the algorithms in `analysis`.

    pub(crate) fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, position: usize) -> &Node {
        &self.nodes[position]
    }

    /// Successor positions of the node at `position`, one entry per edge.
    pub(crate) fn successor_positions(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[position]
            .iter()
            .filter_map(|&e| self.position_of(self.edges[e].target()))
    }

    pub(crate) fn predecessor_positions(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.incoming[position]
            .iter()
            .filter_map(|&e| self.position_of(self.edges[e].source()))
    }
}

//! Builds a flow graph from detected diagram elements using only their
//! geometry.
//!
//! Two boxes are connected when the second sits clearly below the first in
//! roughly the same column, or clearly to its right in roughly the same row.
//! Every ordered pair is tested, so a tall column of boxes is over-connected
//! (each box links to every box below it); downstream stages tolerate that.

mod bbox;

pub use bbox::*;

use crate::config::SpatialSettings;
use crate::error::ConstructionError;
use crate::graph::{Graph, Node, NodeKind, Point};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::{debug, info, warn};

/// OCR results keyed by bounding box index.
pub type RecognizedTexts = AHashMap<usize, RecognizedText>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConstructor {
    vertical_threshold: f64,
    horizontal_threshold: f64,
}

impl Default for GraphConstructor {
    fn default() -> Self {
        Self {
            vertical_threshold: 50.0,
            horizontal_threshold: 100.0,
        }
    }
}

pub struct GraphConstructorBuilder {
    vertical_threshold: f64,
    horizontal_threshold: f64,
}

impl GraphConstructorBuilder {
    pub fn new() -> Self {
        let defaults = GraphConstructor::default();
        Self {
            vertical_threshold: defaults.vertical_threshold,
            horizontal_threshold: defaults.horizontal_threshold,
        }
    }

    pub fn vertical_threshold(mut self, threshold: f64) -> Self {
        self.vertical_threshold = threshold;
        self
    }

    pub fn horizontal_threshold(mut self, threshold: f64) -> Self {
        self.horizontal_threshold = threshold;
        self
    }

    pub fn with_settings(self, settings: &SpatialSettings) -> Self {
        self.vertical_threshold(settings.vertical_threshold)
            .horizontal_threshold(settings.horizontal_threshold)
    }

    pub fn build(self) -> GraphConstructor {
        debug!(
            vertical_threshold = self.vertical_threshold,
            horizontal_threshold = self.horizontal_threshold,
            "graph constructor configured"
        );
        GraphConstructor {
            vertical_threshold: self.vertical_threshold,
            horizontal_threshold: self.horizontal_threshold,
        }
    }
}

impl Default for GraphConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphConstructor {
    pub fn builder() -> GraphConstructorBuilder {
        GraphConstructorBuilder::new()
    }

    pub fn vertical_threshold(&self) -> f64 {
        self.vertical_threshold
    }

    pub fn horizontal_threshold(&self) -> f64 {
        self.horizontal_threshold
    }

    /// One node per box, in input order, connected by the adjacency rule.
    ///
    /// Node `node_{i}` takes box `i`'s class as its type, the text recognized
    /// for index `i` as its label (empty when there is none), and the box
    /// center as its position.
    pub fn construct(
        &self,
        boxes: &[BoundingBox],
        texts: &RecognizedTexts,
    ) -> Result<Graph, ConstructionError> {
        debug!(boxes = boxes.len(), "constructing graph from bounding boxes");
        check_boxes(boxes)?;

        for index in texts.keys().filter(|&&i| i >= boxes.len()) {
            warn!(index, "ignoring recognized text with no matching bounding box");
        }

        let mut graph = Graph::new();
        for (index, bbox) in boxes.iter().enumerate() {
            let label = texts.get(&index).map(RecognizedText::text).unwrap_or("");
            let node = Node::new(node_id(index), bbox.class_label, label)
                .with_position(bbox.center())
                .with_bbox(bbox.rect())
                .with_confidence(bbox.confidence);
            graph.add_node(node)?;
        }

        for (i, from) in boxes.iter().enumerate() {
            for (j, to) in boxes.iter().enumerate() {
                if i != j && self.should_connect(from, to) {
                    graph.connect(&node_id(i), &node_id(j))?;
                    debug!(source = %node_id(i), target = %node_id(j), "connected");
                }
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph constructed"
        );
        Ok(graph)
    }

    /// Whether an edge runs from `from` to `to`.
    pub fn should_connect(&self, from: &BoundingBox, to: &BoundingBox) -> bool {
        let dx = to.center_x() - from.center_x();
        let dy = to.center_y() - from.center_y();

        let below = dy > self.vertical_threshold && dx.abs() < self.horizontal_threshold;
        let right = dx > self.horizontal_threshold && dy.abs() < self.vertical_threshold;
        below || right
    }

    /// [`construct`](Self::construct), then marks the topmost node `start`,
    /// the bottommost `end`, and every node with more than one outgoing edge
    /// `decision`. Ties go to the earliest box. The decision pass runs last
    /// and may override a start or end assignment.
    pub fn construct_with_flow_analysis(
        &self,
        boxes: &[BoundingBox],
        texts: &RecognizedTexts,
    ) -> Result<Graph, ConstructionError> {
        let mut graph = self.construct(boxes, texts)?;
        if boxes.is_empty() {
            return Ok(graph);
        }

        let mut topmost = 0;
        let mut bottommost = 0;
        for (index, bbox) in boxes.iter().enumerate() {
            if bbox.center_y() < boxes[topmost].center_y() {
                topmost = index;
            }
            if bbox.center_y() > boxes[bottommost].center_y() {
                bottommost = index;
            }
        }
        set_kind(&mut graph, &node_id(topmost), NodeKind::Start);
        debug!(node = %node_id(topmost), "identified start node");
        set_kind(&mut graph, &node_id(bottommost), NodeKind::End);
        debug!(node = %node_id(bottommost), "identified end node");

        let branching: Vec<String> = graph
            .nodes()
            .filter(|n| !n.is(NodeKind::Decision) && graph.out_degree(n.id()) > 1)
            .map(|n| n.id().to_string())
            .collect();
        for id in branching {
            set_kind(&mut graph, &id, NodeKind::Decision);
            debug!(node = %id, "changed to decision (multiple outputs)");
        }

        Ok(graph)
    }

    /// A branch-free chain of `process` nodes visited top to bottom, then left
    /// to right. Missing labels are empty.
    pub fn construct_from_coordinates(
        &self,
        points: &[Point],
        labels: &[String],
    ) -> Result<Graph, ConstructionError> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ConstructionError::InvalidBoundingBox {
                index,
                reason: "non-finite coordinates".to_string(),
            });
        }

        let mut graph = Graph::new();
        for (index, point) in points.iter().enumerate() {
            let label = labels.get(index).map(String::as_str).unwrap_or("");
            graph.add_node(Node::new(node_id(index), NodeKind::Process, label).with_position(*point))?;
        }

        let order = (0..points.len()).sorted_by(|&a, &b| {
            points[a]
                .y
                .total_cmp(&points[b].y)
                .then(points[a].x.total_cmp(&points[b].x))
        });
        for (current, next) in order.tuple_windows() {
            graph.connect(&node_id(current), &node_id(next))?;
        }

        Ok(graph)
    }
}

fn node_id(index: usize) -> String {
    format!("node_{}", index)
}

fn set_kind(graph: &mut Graph, id: &str, kind: NodeKind) {
    if let Some(node) = graph.node_mut(id) {
        node.kind = Some(kind);
    }
}

fn check_boxes(boxes: &[BoundingBox]) -> Result<(), ConstructionError> {
    for (index, bbox) in boxes.iter().enumerate() {
        if let Some(reason) = bbox.defect() {
            return Err(ConstructionError::InvalidBoundingBox { index, reason });
        }
        if !(0.0..=1.0).contains(&bbox.confidence) {
            return Err(ConstructionError::ConfidenceOutOfRange {
                index,
                confidence: bbox.confidence,
            });
        }
    }
    Ok(())
}

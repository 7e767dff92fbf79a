//! Turns a free-text process description into a flow graph.
//!
//! The text is split into sentences and each sentence is classified by the
//! ordered rules in [`rules::SENTENCE_RULES`]. A single cursor remembers the
//! node the next sentence attaches to:
//!
//! - a start sentence opens a new chain with no incoming edge,
//! - end and plain sentences are wired from the cursor,
//! - a condition sentence that matches a template ("if X then Y else Z",
//!   "check X") creates a decision with two branch nodes. The branch nodes
//!   stay terminal, and the decision keeps the cursor but accepts no further
//!   edges, so the next sentence opens a new chain.

pub mod condition;
pub mod normalize;
pub mod rules;
pub mod steps;

pub use condition::*;
pub use normalize::{normalize, split_sentences};
pub use rules::{SENTENCE_RULES, SentenceRule};
pub use steps::extract_steps;

use crate::config::ParserSettings;
use crate::error::{GraphError, ParseError};
use crate::graph::{Edge, Graph, NeutralGraph, Node, NodeKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Labels placed on the two edges leaving a parsed decision. They also
/// label a branch node whose own text is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchLabels {
    pub positive: String,
    pub negative: String,
}

impl Default for BranchLabels {
    fn default() -> Self {
        Self {
            positive: "Да".to_string(),
            negative: "Нет".to_string(),
        }
    }
}

pub const DEFAULT_MAX_INPUT_LENGTH: usize = 5000;
const FALLBACK_LABEL_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct TextParser {
    templates: Vec<ConditionTemplate>,
    branch_labels: BranchLabels,
    max_input_length: usize,
}

pub struct TextParserBuilder {
    extra_templates: Vec<String>,
    branch_labels: BranchLabels,
    max_input_length: usize,
}

impl TextParserBuilder {
    pub fn new() -> Self {
        Self {
            extra_templates: Vec::new(),
            branch_labels: BranchLabels::default(),
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }

    pub fn branch_labels(mut self, labels: BranchLabels) -> Self {
        self.branch_labels = labels;
        self
    }

    pub fn max_input_length(mut self, limit: usize) -> Self {
        self.max_input_length = limit;
        self
    }

    /// Adds a condition pattern, tried after the built-in ones. It must have
    /// one or three capture groups.
    pub fn with_condition_template(mut self, pattern: impl Into<String>) -> Self {
        self.extra_templates.push(pattern.into());
        self
    }

    pub fn with_settings(mut self, settings: &ParserSettings) -> Self {
        self.branch_labels = settings.branch_labels.clone();
        self.max_input_length = settings.max_input_length;
        self.extra_templates
            .extend(settings.condition_templates.iter().cloned());
        self
    }

    /// Compiles every template; the first invalid one is reported.
    pub fn build(self) -> Result<TextParser, ParseError> {
        let templates = rules::CONDITION_TEMPLATES
            .iter()
            .copied()
            .chain(self.extra_templates.iter().map(String::as_str))
            .map(ConditionTemplate::new)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(templates = templates.len(), "text parser configured");
        Ok(TextParser {
            templates,
            branch_labels: self.branch_labels,
            max_input_length: self.max_input_length,
        })
    }
}

impl Default for TextParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the next sentence attaches.
struct Cursor {
    id: String,
    /// A decision whose branches are already wired takes no more edges.
    sealed: bool,
}

/// Accumulates nodes and edges while sentences are consumed.
#[derive(Default)]
struct ChainBuilder {
    graph: Graph,
    counter: usize,
    cursor: Option<Cursor>,
}

impl ChainBuilder {
    fn add(&mut self, kind: NodeKind, label: &str) -> Result<String, GraphError> {
        let id = format!("node_{}", self.counter);
        self.counter += 1;
        self.graph.add_node(Node::new(id.as_str(), kind, label))?;
        debug!(node = %id, kind = %kind, "added node");
        Ok(id)
    }

    fn attach(&mut self, id: &str) -> Result<(), GraphError> {
        if let Some(cursor) = self.cursor.as_ref().filter(|c| !c.sealed) {
            self.graph.connect(&cursor.id, id)?;
        }
        Ok(())
    }

    fn move_to(&mut self, id: String, sealed: bool) {
        self.cursor = Some(Cursor { id, sealed });
    }
}

impl TextParser {
    pub fn builder() -> TextParserBuilder {
        TextParserBuilder::new()
    }

    pub fn branch_labels(&self) -> &BranchLabels {
        &self.branch_labels
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    /// Parses `text` into a graph with ids `node_0, node_1, ...` in creation
    /// order.
    ///
    /// When no sentence yields a node, or the text is a single sentence that
    /// matched no rule, the result is the chain `start("Начало") ->
    /// process(first 100 characters of text) -> end("Конец")`.
    pub fn parse(&self, text: &str) -> Result<Graph, ParseError> {
        let length = text.chars().count();
        if length > self.max_input_length {
            return Err(ParseError::InputTooLong {
                length,
                limit: self.max_input_length,
            });
        }
        debug!(length, "parsing text");

        let sentences = split_sentences(text);
        debug!(sentences = sentences.len(), "split into sentences");

        let mut chain = ChainBuilder::default();
        let mut unmatched = 0;
        for sentence in &sentences {
            match SENTENCE_RULES.classify(sentence) {
                Some(SentenceRule::Start) => {
                    let id = chain.add(NodeKind::Start, sentence)?;
                    chain.move_to(id, false);
                }
                Some(SentenceRule::End) => {
                    let id = chain.add(NodeKind::End, sentence)?;
                    chain.attach(&id)?;
                    chain.move_to(id, false);
                }
                Some(SentenceRule::Condition) => self.add_condition(&mut chain, sentence)?,
                None => {
                    unmatched += 1;
                    let id = chain.add(NodeKind::Process, sentence)?;
                    chain.attach(&id)?;
                    chain.move_to(id, false);
                }
            }
        }

        let graph = if chain.graph.is_empty() || (sentences.len() == 1 && unmatched == 1) {
            debug!("no structure recognized, using fallback chain");
            fallback(text)?
        } else {
            chain.graph
        };

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed text into graph"
        );
        Ok(graph)
    }

    /// First template that matches, in order.
    pub fn match_condition(&self, sentence: &str) -> Option<ConditionMatch> {
        self.templates.iter().find_map(|t| t.extract(sentence))
    }

    /// A matched condition always gets both branches; a one-group match
    /// labels them with the branch labels themselves.
    fn add_condition(&self, chain: &mut ChainBuilder, sentence: &str) -> Result<(), GraphError> {
        let (condition, positive, negative) = match self.match_condition(sentence) {
            Some(ConditionMatch::Branches {
                condition,
                positive,
                negative,
            }) => (condition, positive, negative),
            Some(ConditionMatch::Subject(condition)) => (condition, String::new(), String::new()),
            None => {
                let decision = chain.add(NodeKind::Decision, sentence)?;
                chain.attach(&decision)?;
                chain.move_to(decision, false);
                return Ok(());
            }
        };

        let decision = chain.add(NodeKind::Decision, &condition)?;
        chain.attach(&decision)?;

        let labels = &self.branch_labels;
        for (text, edge_label) in [(positive, &labels.positive), (negative, &labels.negative)] {
            let label = if text.is_empty() { edge_label.as_str() } else { text.as_str() };
            let branch = chain.add(NodeKind::Process, label)?;
            chain
                .graph
                .add_edge(Edge::labeled(decision.as_str(), branch, edge_label.as_str()))?;
        }
        chain.move_to(decision, true);
        Ok(())
    }

    /// Parses the text and lists it in the neutral form.
    pub fn parse_structured(&self, text: &str) -> Result<NeutralGraph, ParseError> {
        Ok(self.parse(text)?.to_neutral())
    }
}

fn fallback(text: &str) -> Result<Graph, GraphError> {
    let excerpt: String = text.chars().take(FALLBACK_LABEL_CHARS).collect();
    let mut graph = Graph::new();
    graph.add_node(Node::new("node_0", NodeKind::Start, "Начало"))?;
    graph.add_node(Node::new("node_1", NodeKind::Process, excerpt))?;
    graph.add_node(Node::new("node_2", NodeKind::End, "Конец"))?;
    graph.connect("node_0", "node_1")?;
    graph.connect("node_1", "node_2")?;
    Ok(graph)
}

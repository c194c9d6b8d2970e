//! NodeGraph and Survey: validated reference data for navigation

use super::edge::Edge;
use super::node::{Node, NodeId};
use super::question::{Question, QuestionCatalog, QuestionId};
use crate::constraint::ConstraintError;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// Integrity faults in survey reference data
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Question {0}: text questions take no options, choice questions take exactly two")]
    InvalidOptions(QuestionId),

    #[error("Survey has no nodes")]
    EmptyGraph,

    #[error("Edge {from} -> {to}: {error}")]
    InvalidConstraint {
        from: NodeId,
        to: NodeId,
        error: ConstraintError,
    },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Nodes and the directed edges between them
///
/// The first declared node is the start node. Outgoing edges are kept per
/// source node in declaration order.
#[derive(Debug, Clone)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    outgoing: HashMap<NodeId, Vec<Edge>>,
    edge_count: usize,
}

impl NodeGraph {
    /// Build a graph, checking that ids are unique and every edge endpoint exists
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> GraphResult<Self> {
        if nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), position).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let edge_count = edges.len();
        let mut outgoing: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(GraphError::NodeNotFound(endpoint.clone()));
                }
            }
            outgoing.entry(edge.source.clone()).or_default().push(edge);
        }

        Ok(Self {
            nodes,
            index,
            outgoing,
            edge_count,
        })
    }

    /// Find a node by id
    pub fn find_node(&self, id: &NodeId) -> GraphResult<&Node> {
        self.index
            .get(id)
            .map(|&position| &self.nodes[position])
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Edges leaving a node, in declaration order. Empty for terminal nodes.
    pub fn outgoing_edges(&self, id: &NodeId) -> &[Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first declared node
    pub fn start_node(&self) -> &Node {
        // `new` rejects empty graphs
        &self.nodes[0]
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Every edge, grouped by source node in node declaration order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.nodes
            .iter()
            .flat_map(move |node| self.outgoing_edges(&node.id).iter())
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges across all nodes
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// A validated survey: question catalog plus node graph
///
/// Every node's question resolves and every edge endpoint exists, so lookups
/// made while navigating cannot miss.
#[derive(Debug, Clone)]
pub struct Survey {
    catalog: QuestionCatalog,
    graph: NodeGraph,
}

impl Survey {
    /// Combine a catalog and a graph, checking that every node's question exists
    pub fn new(catalog: QuestionCatalog, graph: NodeGraph) -> GraphResult<Self> {
        for node in graph.nodes() {
            if !catalog.contains(&node.question) {
                return Err(GraphError::QuestionNotFound(node.question.clone()));
            }
        }

        info!(
            questions = catalog.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            start = %graph.start_node().id,
            "Survey built"
        );

        Ok(Self { catalog, graph })
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// The question asked at a node
    pub fn question_for(&self, node: &NodeId) -> GraphResult<&Question> {
        let node = self.graph.find_node(node)?;
        self.catalog.find(&node.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("N-001", "Q-001"),
            Node::new("N-002", "Q-002"),
            Node::new("N-003", "Q-003"),
        ]
    }

    #[test]
    fn test_outgoing_edges_keep_declaration_order() {
        let graph = NodeGraph::new(
            nodes(),
            vec![
                Edge::when("N-001", "N-003", Constraint::parse("value == 2").unwrap()),
                Edge::always("N-002", "N-003"),
                Edge::when("N-001", "N-002", Constraint::parse("value == 1").unwrap()),
            ],
        )
        .unwrap();

        let targets: Vec<&str> = graph
            .outgoing_edges(&NodeId::from("N-001"))
            .iter()
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(targets, vec!["N-003", "N-002"]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_terminal_node_has_no_edges() {
        let graph = NodeGraph::new(nodes(), vec![Edge::always("N-001", "N-002")]).unwrap();
        assert!(graph.outgoing_edges(&NodeId::from("N-003")).is_empty());
    }

    #[test]
    fn test_start_node_is_first_declared() {
        let graph = NodeGraph::new(nodes(), vec![]).unwrap();
        assert_eq!(graph.start_node().id.as_str(), "N-001");
    }

    #[test]
    fn test_find_missing_node() {
        let graph = NodeGraph::new(nodes(), vec![]).unwrap();
        assert!(matches!(
            graph.find_node(&NodeId::from("N-999")),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_empty_graph_rejected() {
        assert!(matches!(NodeGraph::new(vec![], vec![]), Err(GraphError::EmptyGraph)));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = NodeGraph::new(vec![Node::new("N-001", "Q-001"), Node::new("N-001", "Q-002")], vec![]);
        assert!(matches!(result, Err(GraphError::DuplicateNode(_))));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let result = NodeGraph::new(nodes(), vec![Edge::always("N-001", "N-404")]);
        assert!(matches!(result, Err(GraphError::NodeNotFound(id)) if id.as_str() == "N-404"));

        let result = NodeGraph::new(nodes(), vec![Edge::always("N-000", "N-001")]);
        assert!(matches!(result, Err(GraphError::NodeNotFound(id)) if id.as_str() == "N-000"));
    }

    #[test]
    fn test_survey_rejects_unresolved_question() {
        let catalog = QuestionCatalog::new(vec![Question::text("Q-001", "Name")]).unwrap();
        let graph = NodeGraph::new(vec![Node::new("N-001", "Q-001"), Node::new("N-002", "Q-002")], vec![]).unwrap();
        let result = Survey::new(catalog, graph);
        assert!(matches!(result, Err(GraphError::QuestionNotFound(id)) if id.as_str() == "Q-002"));
    }

    #[test]
    fn test_question_reused_by_two_nodes() {
        let catalog = QuestionCatalog::new(vec![Question::text("Q-001", "Name")]).unwrap();
        let graph = NodeGraph::new(vec![Node::new("N-001", "Q-001"), Node::new("N-002", "Q-001")], vec![]).unwrap();
        let survey = Survey::new(catalog, graph).unwrap();
        assert_eq!(
            survey.question_for(&NodeId::from("N-001")).unwrap(),
            survey.question_for(&NodeId::from("N-002")).unwrap()
        );
    }
}

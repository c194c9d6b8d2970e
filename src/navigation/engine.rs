//! NavigationEngine: walks the survey graph one submission at a time

use super::answer::Answer;
use super::port::PresentationPort;
use crate::graph::{Edge, Node, NodeId, Question, Survey};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Message shown when no outgoing edge accepts the answer
pub const NO_ROUTE_MESSAGE: &str =
    "No valid route was found from the current question to any subsequent questions.";

/// Message shown when both options of a choice are set
pub const CONFLICTING_CHOICE_MESSAGE: &str = "Only one option may be selected.";

/// Recoverable submission failures. The engine stays on the current node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("No valid route from node {node}")]
    NoRoute { node: NodeId },

    #[error("Invalid answer at node {node}: both options selected")]
    InvalidAnswer { node: NodeId },
}

/// Result type for navigation operations
pub type NavigationResult<T> = Result<T, NavigationError>;

/// Drives one questionnaire session
///
/// The survey is shared and read-only; the current node is the only state and
/// it changes only through [`submit`](Self::submit). Each session gets its own
/// engine.
pub struct NavigationEngine<P: PresentationPort> {
    survey: Arc<Survey>,
    current: NodeId,
    port: P,
}

impl<P: PresentationPort> NavigationEngine<P> {
    /// Start a session at the survey's first node and show its question
    pub fn new(survey: Arc<Survey>, mut port: P) -> Self {
        let start = survey.graph().start_node();
        debug!(node = %start.id, "Starting survey");
        port.show_question(question_of(&survey, start));
        Self {
            current: start.id.clone(),
            survey,
            port,
        }
    }

    /// Submit an answer to the current question
    ///
    /// Outgoing edges are tried in declaration order and the first one that
    /// is unconditional or whose constraint holds is taken, so an earlier
    /// unconditional edge shadows any later constrained ones. The port gets
    /// exactly one event per call.
    pub fn submit(&mut self, answer: &Answer) -> NavigationResult<&Node> {
        if !answer.is_valid() {
            warn!(node = %self.current, "Rejected answer with both options selected");
            self.port.show_error(CONFLICTING_CHOICE_MESSAGE);
            return Err(NavigationError::InvalidAnswer {
                node: self.current.clone(),
            });
        }

        let value = answer.encode();
        let graph = self.survey.graph();
        let Some(edge) = select_edge(graph.outgoing_edges(&self.current), value) else {
            warn!(node = %self.current, value, "No valid route");
            self.port.show_error(NO_ROUTE_MESSAGE);
            return Err(NavigationError::NoRoute {
                node: self.current.clone(),
            });
        };

        debug!(from = %edge.source, to = %edge.target, value, "Transition");
        let target = node_of(&self.survey, &edge.target);
        self.port.show_question(question_of(&self.survey, target));
        self.current = target.id.clone();
        Ok(target)
    }

    /// The node currently being asked
    pub fn current_node(&self) -> &Node {
        node_of(&self.survey, &self.current)
    }

    /// The question currently being asked
    pub fn current_question(&self) -> &Question {
        question_of(&self.survey, self.current_node())
    }

    /// Whether the current node has no way forward
    pub fn is_terminal(&self) -> bool {
        self.survey.graph().outgoing_edges(&self.current).is_empty()
    }

    pub fn survey(&self) -> &Arc<Survey> {
        &self.survey
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// End the session, handing back the port
    pub fn into_port(self) -> P {
        self.port
    }
}

/// First edge, in order, that admits the encoded answer
fn select_edge(edges: &[Edge], value: i64) -> Option<&Edge> {
    edges.iter().find(|edge| {
        let admitted = edge.admits(value);
        debug!(
            to = %edge.target,
            constraint = edge.constraint.as_ref().map_or("<always>", |c| c.as_str()),
            admitted,
            "Evaluated edge"
        );
        admitted
    })
}

// A `Survey` guarantees every edge endpoint and node question resolves,
// and `current` only ever holds ids taken from it.
fn node_of<'a>(survey: &'a Survey, id: &NodeId) -> &'a Node {
    match survey.graph().find_node(id) {
        Ok(node) => node,
        Err(e) => unreachable!("validated survey lost a node: {}", e),
    }
}

fn question_of<'a>(survey: &'a Survey, node: &Node) -> &'a Question {
    match survey.catalog().find(&node.question) {
        Ok(question) => question,
        Err(e) => unreachable!("validated survey lost a question: {}", e),
    }
}

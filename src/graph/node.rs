//! Node representation in the survey graph

use super::question::QuestionId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
///
/// Serializes as a plain string (e.g. "N-001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A position in the graph holding one question
///
/// The same question may sit behind several nodes, which is how a question
/// is reused on different branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// The question asked at this node
    pub question: QuestionId,
}

impl Node {
    /// Create a new node
    pub fn new(id: impl Into<NodeId>, question: impl Into<QuestionId>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
        }
    }
}

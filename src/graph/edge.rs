//! Directed, optionally constrained edges between nodes

use super::node::NodeId;
use crate::constraint::Constraint;
use serde::{Deserialize, Serialize};

/// A directed edge between two nodes
///
/// An edge without a constraint always fires. Edges leaving the same node
/// are tried in the order they were declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Guard evaluated against the encoded answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl Edge {
    /// Create an unconditional edge
    pub fn always(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            constraint: None,
        }
    }

    /// Create an edge guarded by a constraint
    pub fn when(source: impl Into<NodeId>, target: impl Into<NodeId>, constraint: Constraint) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            constraint: Some(constraint),
        }
    }

    /// Whether this edge fires for the given encoded answer
    pub fn admits(&self, value: i64) -> bool {
        self.constraint
            .as_ref()
            .map_or(true, |constraint| constraint.evaluate(value))
    }

    /// Check if the edge has no constraint
    pub fn is_unconditional(&self) -> bool {
        self.constraint.is_none()
    }
}

//! surveygraph: Graph-Driven Questionnaire Engine
//!
//! The path through a questionnaire is decided at runtime by a small
//! directed graph rather than a fixed sequence of questions.
//!
//! # Core Concepts
//!
//! - **Questions**: what is asked (free text, or a choice between two options)
//! - **Nodes**: positions in the graph, each asking one question; a question
//!   may appear at several nodes
//! - **Edges**: directed transitions, optionally guarded by a constraint such
//!   as `value == 1`; the first edge that fires wins
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use surveygraph::{Answer, NavigationEngine, RecordingPort, SurveyDefinition};
//!
//! let survey = SurveyDefinition::vat_registration()?.into_survey()?;
//! let mut engine = NavigationEngine::new(Arc::new(survey), RecordingPort::new());
//!
//! engine.submit(&Answer::text("Acme Ltd"))?;
//! engine.submit(&Answer::second())?;
//! assert_eq!(engine.current_node().id.as_str(), "N-004");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constraint;
pub mod definition;
mod graph;
pub mod navigation;

pub use constraint::{Constraint, ConstraintError};
pub use definition::{DefinitionError, DefinitionResult, SurveyDefinition};
pub use graph::{
    Edge, GraphError, GraphResult, Node, NodeGraph, NodeId, Question, QuestionCatalog,
    QuestionId, QuestionType, Survey,
};
pub use navigation::{
    Answer, NavigationEngine, NavigationError, PresentationEvent, PresentationPort, RecordingPort,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

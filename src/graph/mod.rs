//! Core graph data structures

mod edge;
mod node;
mod question;
mod survey;


pub use edge::Edge;
pub use node::{Node, NodeId};
pub use question::{Question, QuestionCatalog, QuestionId, QuestionType};
pub use survey::{GraphError, GraphResult, NodeGraph, Survey};

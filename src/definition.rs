//! Survey reference data as written in YAML or JSON
//!
//! A `SurveyDefinition` is the raw, unvalidated shape of a survey.
//! `into_survey` turns it into a [`Survey`], failing fast on the first
//! integrity fault: unknown ids, duplicate ids, bad option lists and
//! malformed constraints are all caught here, never mid-traversal.

use crate::constraint::Constraint;
use crate::graph::{
    Edge, GraphError, Node, NodeGraph, Question, QuestionCatalog, QuestionType, Survey,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The bundled sample survey
const VAT_REGISTRATION_YAML: &str = include_str!("../surveys/vat-registration.yaml");

/// Errors that can occur while loading a survey definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown survey format for {0}: expected .yaml, .yml or .json")]
    UnknownFormat(PathBuf),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for definition loading
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// A question as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    #[serde(alias = "question_id")]
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// A node as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(alias = "node_id")]
    pub id: String,
    #[serde(alias = "question_id")]
    pub question: String,
}

/// An edge as declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(alias = "source_node_id")]
    pub source: String,
    #[serde(alias = "target_node_id")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
}

/// Unvalidated survey reference data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl SurveyDefinition {
    /// Parse a definition from YAML text
    pub fn from_yaml_str(text: &str) -> DefinitionResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a definition from JSON text
    pub fn from_json_str(text: &str) -> DefinitionResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a definition from a file, choosing the format by extension
    pub fn load(path: &Path) -> DefinitionResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> DefinitionResult<Self> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(DefinitionError::UnknownFormat(path.to_path_buf())),
        };
        debug!(path = %path.display(), "Loading survey definition");
        let text = std::fs::read_to_string(path)?;
        parse(&text)
    }

    /// The bundled VAT registration sample
    pub fn vat_registration() -> DefinitionResult<Self> {
        Self::from_yaml_str(VAT_REGISTRATION_YAML)
    }

    /// Validate and build the survey
    pub fn into_survey(self) -> Result<Survey, GraphError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionSpec::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = QuestionCatalog::new(questions)?;

        let nodes = self
            .nodes
            .into_iter()
            .map(|spec| Node::new(spec.id, spec.question))
            .collect();

        let edges = self
            .edges
            .into_iter()
            .map(EdgeSpec::into_edge)
            .collect::<Result<Vec<_>, _>>()?;

        let graph = NodeGraph::new(nodes, edges)?;
        Survey::new(catalog, graph)
    }
}

impl QuestionSpec {
    fn into_question(self) -> Result<Question, GraphError> {
        let options = match (self.question_type, self.options) {
            (QuestionType::Text, None) => None,
            (QuestionType::SingleChoicePair, Some(options)) => {
                let pair: [String; 2] = options
                    .try_into()
                    .map_err(|_| GraphError::InvalidOptions(self.id.as_str().into()))?;
                Some(pair)
            }
            _ => return Err(GraphError::InvalidOptions(self.id.into())),
        };
        Ok(Question {
            id: self.id.into(),
            label: self.label,
            question_type: self.question_type,
            options,
        })
    }
}

impl EdgeSpec {
    fn into_edge(self) -> Result<Edge, GraphError> {
        let constraint = self
            .constraint
            .map(|text| {
                Constraint::parse(text).map_err(|error| GraphError::InvalidConstraint {
                    from: self.source.as_str().into(),
                    to: self.target.as_str().into(),
                    error,
                })
            })
            .transpose()?;
        Ok(Edge {
            source: self.source.into(),
            target: self.target.into(),
            constraint,
        })
    }
}

/// Default location of a user survey file (`<config dir>/surveygraph/survey.yaml`)
pub fn default_survey_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("surveygraph").join("survey.yaml"))
}

//! Questions and the catalog that resolves them by identifier

use super::survey::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a question
///
/// Serializes as a plain string (e.g. "Q-001")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a QuestionId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Free text entry
    Text,
    /// Exactly two mutually exclusive options
    #[serde(alias = "radio")]
    SingleChoicePair,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Text => "text",
            Self::SingleChoicePair => "single-choice-pair",
        })
    }
}

/// A question definition. Immutable once placed in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier
    pub id: QuestionId,
    /// Display text
    pub label: String,
    /// Answer kind
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Option labels, present only for choice questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<[String; 2]>,
}

impl Question {
    /// Create a free text question
    pub fn text(id: impl Into<QuestionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            question_type: QuestionType::Text,
            options: None,
        }
    }

    /// Create a two-option choice question
    pub fn choice(
        id: impl Into<QuestionId>,
        label: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            question_type: QuestionType::SingleChoicePair,
            options: Some([first.into(), second.into()]),
        }
    }

    /// Check that the options agree with the question type
    pub(crate) fn check_options(&self) -> GraphResult<()> {
        let consistent = match self.question_type {
            QuestionType::Text => self.options.is_none(),
            QuestionType::SingleChoicePair => self.options.is_some(),
        };
        if consistent {
            Ok(())
        } else {
            Err(GraphError::InvalidOptions(self.id.clone()))
        }
    }
}

/// Static lookup of questions by identifier, preserving declaration order
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting duplicate ids and malformed options
    pub fn new(questions: Vec<Question>) -> GraphResult<Self> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            question.check_options()?;
            if index.insert(question.id.clone(), position).is_some() {
                return Err(GraphError::DuplicateQuestion(question.id.clone()));
            }
        }
        Ok(Self { questions, index })
    }

    /// Find a question by id
    pub fn find(&self, id: &QuestionId) -> GraphResult<&Question> {
        self.index
            .get(id)
            .map(|&position| &self.questions[position])
            .ok_or_else(|| GraphError::QuestionNotFound(id.clone()))
    }

    /// Check whether a question exists
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.index.contains_key(id)
    }

    /// Questions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the catalog holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

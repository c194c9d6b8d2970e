//! Survey building utilities for integration tests

use rand::Rng;
use std::sync::Arc;
use surveygraph::definition::{EdgeSpec, NodeSpec, QuestionSpec};
use surveygraph::{Answer, GraphError, QuestionType, Survey, SurveyDefinition};

/// Builds a `SurveyDefinition` node by node. Every node gets its own question.
#[derive(Debug, Default)]
pub struct SurveyBuilder {
    definition: SurveyDefinition,
}

impl SurveyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node asking a free text question
    pub fn text_node(self, id: &str) -> Self {
        self.push_node(id, QuestionType::Text, None)
    }

    /// Add a node asking a yes/no question
    pub fn choice_node(self, id: &str) -> Self {
        self.push_node(
            id,
            QuestionType::SingleChoicePair,
            Some(vec!["Yes".to_string(), "No".to_string()]),
        )
    }

    fn push_node(mut self, id: &str, question_type: QuestionType, options: Option<Vec<String>>) -> Self {
        let question = format!("Q-{}", id);
        self.definition.questions.push(QuestionSpec {
            id: question.clone(),
            label: format!("Question at {}", id),
            question_type,
            options,
        });
        self.definition.nodes.push(NodeSpec {
            id: id.to_string(),
            question,
        });
        self
    }

    /// Add an unconditional edge
    pub fn edge(self, source: &str, target: &str) -> Self {
        self.push_edge(source, target, None)
    }

    /// Add a constrained edge
    pub fn edge_when(self, source: &str, target: &str, constraint: &str) -> Self {
        self.push_edge(source, target, Some(constraint.to_string()))
    }

    fn push_edge(mut self, source: &str, target: &str, constraint: Option<String>) -> Self {
        self.definition.edges.push(EdgeSpec {
            source: source.to_string(),
            target: target.to_string(),
            constraint,
        });
        self
    }

    pub fn try_build(self) -> Result<Survey, GraphError> {
        self.definition.into_survey()
    }

    pub fn build(self) -> Arc<Survey> {
        Arc::new(self.try_build().expect("Failed to build survey"))
    }
}

/// The bundled VAT registration survey
pub fn vat_survey() -> Arc<Survey> {
    let definition = SurveyDefinition::vat_registration().expect("Bundled survey should parse");
    Arc::new(definition.into_survey().expect("Bundled survey should validate"))
}

/// Any valid answer: text, either option, or no option
pub fn random_answer(rng: &mut impl Rng) -> Answer {
    match rng.gen_range(0..4) {
        0 => {
            let len = rng.gen_range(0..12);
            let text: String = (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            Answer::text(text)
        }
        1 => Answer::first(),
        2 => Answer::second(),
        _ => Answer::choice(false, false),
    }
}

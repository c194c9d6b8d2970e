//! Common test utilities for navigation tests
//!
//! Helpers for building surveys in code and generating answers.

pub mod survey_builder;

#[allow(unused_imports)]
pub use survey_builder::{random_answer, vat_survey, SurveyBuilder};

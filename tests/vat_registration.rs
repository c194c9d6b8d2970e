//! VAT registration walkthrough
//!
//! Drives the bundled survey through both of its branches and checks the
//! events seen by the presentation layer.

mod common;

use common::vat_survey;
use surveygraph::navigation::NO_ROUTE_MESSAGE;
use surveygraph::{Answer, NavigationEngine, NavigationError, PresentationEvent, RecordingPort};

fn shown_question(event: &PresentationEvent) -> &str {
    match event {
        PresentationEvent::ShowQuestion { question } => question.id.as_str(),
        PresentationEvent::ShowError { message } => panic!("expected a question, got error: {}", message),
    }
}

#[test]
fn test_starts_at_organisation_name() {
    let engine = NavigationEngine::new(vat_survey(), RecordingPort::new());
    assert_eq!(engine.current_node().id.as_str(), "N-001");
    assert_eq!(
        engine.current_question().label,
        "What is the legal name of your organisation?"
    );
}

#[test]
fn test_registered_branch_asks_for_vat_number() {
    let mut engine = NavigationEngine::new(vat_survey(), RecordingPort::new());

    assert_eq!(engine.submit(&Answer::text("Acme Ltd")).unwrap().id.as_str(), "N-002");
    assert_eq!(engine.submit(&Answer::choice(true, false)).unwrap().id.as_str(), "N-003");
    assert_eq!(engine.submit(&Answer::text("GB123456789")).unwrap().id.as_str(), "N-004");

    let shown: Vec<&str> = engine.port().events().iter().map(shown_question).collect();
    assert_eq!(shown, vec!["Q-001", "Q-002", "Q-003", "Q-004"]);
}

#[test]
fn test_unregistered_branch_skips_vat_number() {
    let mut engine = NavigationEngine::new(vat_survey(), RecordingPort::new());

    engine.submit(&Answer::text("Acme Ltd")).unwrap();
    let next = engine.submit(&Answer::choice(false, true)).unwrap();
    assert_eq!(next.id.as_str(), "N-004");
}

#[test]
fn test_unanswered_choice_takes_second_branch() {
    let mut engine = NavigationEngine::new(vat_survey(), RecordingPort::new());

    engine.submit(&Answer::text("Acme Ltd")).unwrap();
    let next = engine.submit(&Answer::choice(false, false)).unwrap();
    assert_eq!(next.id.as_str(), "N-004");
}

#[test]
fn test_vat_number_step_ignores_answer_content() {
    for answer in [Answer::text(""), Answer::first(), Answer::second()] {
        let mut engine = NavigationEngine::new(vat_survey(), RecordingPort::new());
        engine.submit(&Answer::text("Acme Ltd")).unwrap();
        engine.submit(&Answer::first()).unwrap();
        assert_eq!(engine.submit(&answer).unwrap().id.as_str(), "N-004");
    }
}

#[test]
fn test_last_question_has_no_onward_route() {
    let mut engine = NavigationEngine::new(vat_survey(), RecordingPort::new());
    engine.submit(&Answer::text("Acme Ltd")).unwrap();
    engine.submit(&Answer::second()).unwrap();
    assert!(engine.is_terminal());

    let err = engine.submit(&Answer::text("50 employees")).unwrap_err();
    assert!(matches!(err, NavigationError::NoRoute { ref node } if node.as_str() == "N-004"));
    assert_eq!(engine.current_node().id.as_str(), "N-004");
    assert_eq!(
        engine.port().last(),
        Some(&PresentationEvent::ShowError {
            message: NO_ROUTE_MESSAGE.to_string()
        })
    );
}

#[test]
fn test_sessions_share_survey_but_not_position() {
    let survey = vat_survey();
    let mut first = NavigationEngine::new(survey.clone(), RecordingPort::new());
    let second = NavigationEngine::new(survey, RecordingPort::new());

    first.submit(&Answer::text("Acme Ltd")).unwrap();
    assert_eq!(first.current_node().id.as_str(), "N-002");
    assert_eq!(second.current_node().id.as_str(), "N-001");
}

//! Routing properties over generated answers
//!
//! Edge order decides precedence, unconditional edges ignore the answer,
//! and the same input always takes the same route.

mod common;

use common::{random_answer, SurveyBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use surveygraph::{Answer, GraphError, NavigationEngine, NavigationError, RecordingPort};

/// Answers generated per property
const SAMPLES: usize = 200;

#[test]
fn test_single_unconditional_edge_ignores_answer() {
    let survey = SurveyBuilder::new().text_node("A").text_node("B").edge("A", "B").build();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..SAMPLES {
        let mut engine = NavigationEngine::new(survey.clone(), RecordingPort::new());
        let answer = random_answer(&mut rng);
        assert_eq!(engine.submit(&answer).unwrap().id.as_str(), "B", "answer {:?}", answer);
    }
}

#[test]
fn test_first_matching_edge_wins() {
    let survey = SurveyBuilder::new()
        .choice_node("A")
        .text_node("ONE")
        .text_node("NOT-ONE")
        .text_node("FALLBACK")
        .edge_when("A", "ONE", "value == 1")
        .edge_when("A", "NOT-ONE", "value != 1")
        .edge("A", "FALLBACK")
        .build();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..SAMPLES {
        let answer = random_answer(&mut rng);
        let expected = if answer.encode() == 1 { "ONE" } else { "NOT-ONE" };
        let mut engine = NavigationEngine::new(survey.clone(), RecordingPort::new());
        assert_eq!(engine.submit(&answer).unwrap().id.as_str(), expected);
    }
}

#[test]
fn test_routing_is_deterministic() {
    let survey = SurveyBuilder::new()
        .choice_node("A")
        .text_node("B")
        .text_node("C")
        .edge_when("A", "B", "value >= 1")
        .edge_when("A", "C", "value == 2")
        .build();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..SAMPLES {
        let answer = random_answer(&mut rng);
        let targets: Vec<String> = (0..3)
            .map(|_| {
                let mut engine = NavigationEngine::new(survey.clone(), RecordingPort::new());
                engine.submit(&answer).unwrap().id.to_string()
            })
            .collect();
        assert!(targets.iter().all(|t| t == "B"), "targets {:?}", targets);
    }
}

#[test]
fn test_node_without_edges_never_moves() {
    let survey = SurveyBuilder::new().text_node("ONLY").build();
    let mut engine = NavigationEngine::new(survey, RecordingPort::new());
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..SAMPLES {
        let answer = random_answer(&mut rng);
        assert!(matches!(engine.submit(&answer), Err(NavigationError::NoRoute { .. })));
        assert_eq!(engine.current_node().id.as_str(), "ONLY");
    }
    assert_eq!(engine.port().events().len(), SAMPLES + 1);
}

#[test]
fn test_known_path_reaches_expected_node() {
    let survey = SurveyBuilder::new()
        .text_node("START")
        .choice_node("FORK")
        .text_node("LEFT")
        .choice_node("RIGHT")
        .text_node("END")
        .edge("START", "FORK")
        .edge_when("FORK", "LEFT", "value == 1")
        .edge_when("FORK", "RIGHT", "value == 2")
        .edge("LEFT", "END")
        .edge_when("RIGHT", "START", "value == 1")
        .edge_when("RIGHT", "END", "value == 2")
        .build();

    let path = [
        Answer::text("begin"),
        Answer::second(),
        Answer::first(),
        Answer::text("again"),
        Answer::first(),
        Answer::text("done"),
    ];
    let expected = ["FORK", "RIGHT", "START", "FORK", "LEFT", "END"];

    let mut engine = NavigationEngine::new(survey, RecordingPort::new());
    for (answer, want) in path.iter().zip(expected) {
        assert_eq!(engine.submit(answer).unwrap().id.as_str(), want);
    }
}

#[test]
fn test_malformed_constraint_rejected_before_navigation() {
    let result = SurveyBuilder::new()
        .choice_node("A")
        .text_node("B")
        .edge_when("A", "B", "value === 1")
        .try_build();
    assert!(matches!(result, Err(GraphError::InvalidConstraint { .. })));

    let result = SurveyBuilder::new()
        .choice_node("A")
        .text_node("B")
        .edge_when("A", "B", "process.exit()")
        .try_build();
    assert!(matches!(result, Err(GraphError::InvalidConstraint { .. })));
}

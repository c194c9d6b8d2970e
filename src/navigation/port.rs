//! The presentation boundary
//!
//! The engine knows nothing about rendering. It tells a `PresentationPort`
//! which question to show, or which error to show, and nothing else.

use crate::graph::Question;
use serde::Serialize;

/// Receives display events from a `NavigationEngine`
pub trait PresentationPort {
    /// Reset all inputs and render `question`, including both option labels
    /// for choice questions. Any visible error is hidden.
    fn show_question(&mut self, question: &Question);

    /// Render an error message until the next `show_question`.
    fn show_error(&mut self, message: &str);
}

impl<P: PresentationPort + ?Sized> PresentationPort for &mut P {
    fn show_question(&mut self, question: &Question) {
        (**self).show_question(question);
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }
}

impl<P: PresentationPort + ?Sized> PresentationPort for Box<P> {
    fn show_question(&mut self, question: &Question) {
        (**self).show_question(question);
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }
}

/// One notification sent to a port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    ShowQuestion { question: Question },
    ShowError { message: String },
}

/// A port that records every event in order
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    events: Vec<PresentationEvent>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&PresentationEvent> {
        self.events.last()
    }

    /// Take the recorded events, leaving the port empty
    pub fn drain(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PresentationPort for RecordingPort {
    fn show_question(&mut self, question: &Question) {
        self.events.push(PresentationEvent::ShowQuestion {
            question: question.clone(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(PresentationEvent::ShowError {
            message: message.to_string(),
        });
    }
}

//! Navigation through a survey: answers, the engine, and the presentation port

mod answer;
mod engine;
mod port;

pub use answer::{Answer, FIRST_OPTION, SECOND_OPTION};
pub use engine::{
    NavigationEngine, NavigationError, NavigationResult, CONFLICTING_CHOICE_MESSAGE,
    NO_ROUTE_MESSAGE,
};
pub use port::{PresentationEvent, PresentationPort, RecordingPort};

//! Submitted answers and their discrete encoding

use serde::{Deserialize, Serialize};

/// Encoded value when the first option is chosen
pub const FIRST_OPTION: i64 = 1;
/// Encoded value for anything else
pub const SECOND_OPTION: i64 = 2;

/// A single submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Answer {
    /// Free text
    Text { text: String },
    /// Radio-style pair of flags; at most one may be set
    Choice { first: bool, second: bool },
}

impl Answer {
    pub fn text(text: impl Into<String>) -> Self {
        Answer::Text { text: text.into() }
    }

    pub fn choice(first: bool, second: bool) -> Self {
        Answer::Choice { first, second }
    }

    /// First option selected
    pub fn first() -> Self {
        Self::choice(true, false)
    }

    /// Second option selected
    pub fn second() -> Self {
        Self::choice(false, true)
    }

    /// Whether the answer respects radio semantics
    pub fn is_valid(&self) -> bool {
        !matches!(self, Answer::Choice { first: true, second: true })
    }

    /// Encode for constraint evaluation: `1` if the first option is set, else `2`.
    ///
    /// A choice with neither flag set and a text answer both encode to `2`,
    /// the same as an explicit second-option choice.
    pub fn encode(&self) -> i64 {
        match self {
            Answer::Choice { first: true, .. } => FIRST_OPTION,
            _ => SECOND_OPTION,
        }
    }
}

//! Quiz data model and the generation parsing pipeline.
//!
//! A quiz is an ordered, non-empty sequence of validated multiple-choice
//! questions. Everything in this module is pure: normalization, prompt
//! rendering, response parsing, and id derivation have no side effects.

pub mod id;
pub mod normalize;
pub mod parse;
pub mod prompt;

pub use id::{derive_id, QuizId};
pub use normalize::{normalize, DEFAULT_MAX_WORDS};
pub use parse::parse_questions;
pub use prompt::build_prompt;

use serde::{Deserialize, Serialize};

/// Number of answer options every accepted question carries.
pub const OPTION_COUNT: usize = 4;

/// One validated multiple-choice question.
///
/// Option order is significant: the position of the correct option is the
/// answer key. Records are immutable once produced; all access goes through
/// the read-only accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl QuestionRecord {
    /// Build a record, enforcing the shape invariants: a non-empty stem,
    /// exactly [`OPTION_COUNT`] options, an in-range correct index, and a
    /// non-empty explanation. Returns `None` when any of them fails.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Option<Self> {
        let prompt = prompt.into();
        let explanation = explanation.into();
        if prompt.is_empty() || explanation.is_empty() {
            return None;
        }
        if options.len() != OPTION_COUNT || correct_index >= OPTION_COUNT {
            return None;
        }
        Some(Self {
            prompt,
            options,
            correct_index,
            explanation,
        })
    }

    /// The question stem.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The answer options, in label order (A through D).
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Explanation shown on demand after answering.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//! Quiz attempt state machine.
//!
//! One `QuizSession` owns the mutable state of a single attempt: position,
//! locked answers, running score, and explanation visibility. States are
//! `AT(i)` for each question index, with an unlocked/locked sub-status, and
//! a terminal `DONE` once the index passes the last question. Transitions
//! outside their legal sub-status are caller bugs and come back as
//! [`SessionError`]; the sole tolerated exception is a repeated submit on a
//! locked question, which is a no-op.
//!
//! Quiz content is shared read-only across attempts; session state never is.

use std::sync::Arc;

use serde::Serialize;

use crate::error::SessionError;
use crate::quiz::QuestionRecord;

/// Sub-status of the question currently in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    /// No answer submitted yet.
    Unlocked,
    /// Answer recorded; explanation and advance become legal.
    Locked,
}

/// Result of locking in an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The option index that is locked in (the first one submitted).
    pub chosen: usize,
    pub correct: bool,
}

/// Final totals for a completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub attempted: usize,
    pub correct: usize,
    pub wrong: usize,
    pub percent: f64,
}

pub struct QuizSession {
    questions: Arc<[QuestionRecord]>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    // Fixed-shape flag array parallel to answers: guarantees each question
    // contributes to the score at most once, independent of how often the
    // locked state is re-observed.
    scored: Vec<bool>,
    score: usize,
    explanation_visible: bool,
}

impl QuizSession {
    /// Start an attempt at question 0 with everything unlocked.
    pub fn new(questions: Arc<[QuestionRecord]>) -> Self {
        let len = questions.len();
        Self {
            questions,
            current_index: 0,
            answers: vec![None; len],
            scored: vec![false; len],
            score: 0,
            explanation_visible: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the question in view; equals `len()` once the attempt is done.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_done(&self) -> bool {
        self.current_index == self.questions.len()
    }

    /// The question in view, or `None` once done.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current_index)
    }

    /// Sub-status of the question in view, or `None` once done.
    pub fn status(&self) -> Option<AnswerStatus> {
        if self.is_done() {
            return None;
        }
        Some(match self.answers[self.current_index] {
            Some(_) => AnswerStatus::Locked,
            None => AnswerStatus::Unlocked,
        })
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    /// Lock in an answer for the question in view.
    ///
    /// Legal only while unlocked; a second call while locked is a no-op that
    /// re-reports the recorded verdict without touching answer or score.
    pub fn submit(&mut self, option_index: usize) -> Result<SubmitOutcome, SessionError> {
        if self.is_done() {
            return Err(SessionError::QuizComplete);
        }
        let i = self.current_index;
        let question = &self.questions[i];

        if let Some(chosen) = self.answers[i] {
            return Ok(SubmitOutcome {
                chosen,
                correct: chosen == question.correct_index(),
            });
        }

        let len = question.options().len();
        if option_index >= len {
            return Err(SessionError::OptionOutOfRange {
                given: option_index,
                len,
            });
        }

        self.answers[i] = Some(option_index);
        let correct = option_index == question.correct_index();
        if correct && !self.scored[i] {
            self.score += 1;
            self.scored[i] = true;
        }
        Ok(SubmitOutcome {
            chosen: option_index,
            correct,
        })
    }

    /// Reveal the explanation for the locked question in view.
    pub fn reveal_explanation(&mut self) -> Result<&str, SessionError> {
        if self.is_done() {
            return Err(SessionError::QuizComplete);
        }
        let i = self.current_index;
        if self.answers[i].is_none() {
            return Err(SessionError::NotYetAnswered(i));
        }
        self.explanation_visible = true;
        Ok(self.questions[i].explanation())
    }

    /// Move to the next question, hiding the explanation again.
    ///
    /// Legal only while locked; reaching the end enters the terminal state.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.is_done() {
            return Err(SessionError::QuizComplete);
        }
        let i = self.current_index;
        if self.answers[i].is_none() {
            return Err(SessionError::NotYetAnswered(i));
        }
        self.current_index += 1;
        self.explanation_visible = false;
        Ok(())
    }

    /// Compute the attempt totals. Pure; normally read once the attempt is
    /// done, after which the session is discarded.
    pub fn summary(&self) -> Summary {
        let total = self.questions.len();
        let attempted = self.answers.iter().filter(|a| a.is_some()).count();
        let correct = self.score;
        let percent = if total == 0 {
            0.0
        } else {
            100.0 * correct as f64 / total as f64
        };
        Summary {
            total,
            attempted,
            correct,
            wrong: attempted - correct,
            percent,
        }
    }
}

//! Quizsmith: Document-to-Quiz Generation and Grading
//!
//! Turns extracted document text into validated multiple-choice quizzes via
//! a generative text model, addresses each quiz by a content-derived id,
//! and drives stateful quiz attempts with scoring.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod quiz;
pub mod session;
pub mod store;

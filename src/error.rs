//! Error types for the quizsmith generation pipeline and session engine.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open quiz store: {0}")]
    Open(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Failed to encode quiz {0}: {1}")]
    Encode(String, String),

    #[error("Failed to decode stored quiz: {0}")]
    Decode(String),
}

/// Pipeline- and provider-level errors
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("No text could be extracted from the source")]
    NoTextExtracted,

    #[error("Generation produced no usable questions")]
    GenerationFailed,

    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal interaction failed: {0}")]
    Terminal(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Invalid quiz-attempt transitions.
///
/// These indicate a caller bug in the presentation layer, not a recoverable
/// runtime condition; the one tolerated exception is a repeated submit on an
/// already-locked question, which is a no-op rather than an error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Question {0} has not been answered yet")]
    NotYetAnswered(usize),

    #[error("Option index {given} out of range for a {len}-option question")]
    OptionOutOfRange { given: usize, len: usize },

    #[error("Quiz is complete; no further transitions accepted")]
    QuizComplete,
}

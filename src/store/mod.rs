//! Quiz persistence.
//!
//! Quizzes are owned by the store once generated; the pipeline only produces
//! them and hands off ownership. Lookup by id is the sharing mechanism: the
//! same id always resolves to the same content for every taker.

pub mod persistence;

pub use persistence::SledQuizStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::quiz::{QuestionRecord, QuizId};

/// A generated quiz as it lives in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: QuizId,
    pub questions: Vec<QuestionRecord>,
    /// Label of the uploaded source the quiz was generated from.
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Quiz store interface
///
/// `put` has upsert semantics: an id already present is overwritten. `get`
/// on an absent id returns `None`; callers render that as "quiz not found"
/// rather than treating it as an error.
pub trait QuizStore: Send + Sync {
    fn put(&self, quiz: &StoredQuiz) -> Result<(), StorageError>;

    fn get(&self, id: &QuizId) -> Result<Option<StoredQuiz>, StorageError>;

    /// All stored quizzes, newest first.
    fn list(&self) -> Result<Vec<StoredQuiz>, StorageError>;
}

//! Persistence layer for the quiz store.

use std::path::Path;

use crate::error::StorageError;
use crate::quiz::QuizId;
use crate::store::{QuizStore, StoredQuiz};

/// Sled-based implementation of [`QuizStore`].
///
/// Keys are the printable quiz ids; values are bincode-encoded
/// [`StoredQuiz`] records.
pub struct SledQuizStore {
    db: sled::Db,
}

impl SledQuizStore {
    /// Open (or create) a quiz store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { db })
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl QuizStore for SledQuizStore {
    fn put(&self, quiz: &StoredQuiz) -> Result<(), StorageError> {
        let value = bincode::serialize(quiz)
            .map_err(|e| StorageError::Encode(quiz.id.to_string(), e.to_string()))?;
        self.db
            .insert(quiz.id.as_str().as_bytes(), value)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        self.flush()
    }

    fn get(&self, id: &QuizId) -> Result<Option<StoredQuiz>, StorageError> {
        match self
            .db
            .get(id.as_str().as_bytes())
            .map_err(|e| StorageError::Backend(e.to_string()))?
        {
            Some(value) => {
                let quiz: StoredQuiz = bincode::deserialize(&value)
                    .map_err(|e| StorageError::Decode(e.to_string()))?;
                Ok(Some(quiz))
            }
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<StoredQuiz>, StorageError> {
        let mut quizzes = Vec::new();
        for item in self.db.iter() {
            let (_key, value) = item.map_err(|e| StorageError::Backend(e.to_string()))?;
            let quiz: StoredQuiz =
                bincode::deserialize(&value).map_err(|e| StorageError::Decode(e.to_string()))?;
            quizzes.push(quiz);
        }
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }
}

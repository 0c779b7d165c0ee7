//! Generation pipeline orchestration.
//!
//! Wires the collaborators together: extracted text is normalized, rendered
//! into a prompt, sent to the generator, parsed into records, addressed by
//! content id, and handed off to the store. Single-shot: every step either
//! applies or fails the whole request; nothing is persisted on failure and
//! nothing is retried here.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::QuizError;
use crate::extract::{SourceKind, TextExtractor};
use crate::provider::QuestionGenerator;
use crate::quiz::{build_prompt, derive_id, normalize, parse_questions, QuizId, DEFAULT_MAX_WORDS};
use crate::store::{QuizStore, StoredQuiz};

pub struct QuizPipeline {
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn QuestionGenerator>,
    store: Arc<dyn QuizStore>,
    max_words: usize,
}

impl QuizPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn QuestionGenerator>,
        store: Arc<dyn QuizStore>,
    ) -> Self {
        Self {
            extractor,
            generator,
            store,
            max_words: DEFAULT_MAX_WORDS,
        }
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Generate, persist, and return a quiz from an uploaded file.
    pub async fn generate_from_file(
        &self,
        path: &Path,
        num_questions: usize,
    ) -> Result<StoredQuiz, QuizError> {
        debug!(
            path = %path.display(),
            kind = ?SourceKind::from_path(path),
            "extracting source text"
        );
        let raw = self.extractor.extract(path);
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.generate_from_text(&raw, num_questions, source).await
    }

    /// Generate, persist, and return a quiz from already-extracted text.
    pub async fn generate_from_text(
        &self,
        raw: &str,
        num_questions: usize,
        source: Option<String>,
    ) -> Result<StoredQuiz, QuizError> {
        let normalized = normalize(raw, self.max_words);
        if normalized.is_empty() {
            return Err(QuizError::NoTextExtracted);
        }

        let prompt = build_prompt(&normalized, num_questions);
        let response = self.generator.generate(&prompt).await?;

        let questions = parse_questions(&response);
        if questions.is_empty() {
            warn!(
                provider = self.generator.provider_name(),
                model = self.generator.model_name(),
                "response contained no usable question blocks"
            );
            return Err(QuizError::GenerationFailed);
        }
        if questions.len() < num_questions {
            debug!(
                requested = num_questions,
                parsed = questions.len(),
                "generator returned fewer questions than requested"
            );
        }

        let id = derive_id(&questions);
        let stored = StoredQuiz {
            id: id.clone(),
            questions,
            source,
            created_at: Utc::now(),
        };
        self.store.put(&stored)?;
        info!(quiz_id = %id, questions = stored.questions.len(), "quiz generated and stored");
        Ok(stored)
    }

    /// Fetch a stored quiz; `None` means "quiz not found", not an error.
    pub fn load(&self, id: &QuizId) -> Result<Option<StoredQuiz>, QuizError> {
        Ok(self.store.get(id)?)
    }
}

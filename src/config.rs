//! Configuration System
//!
//! Hierarchical configuration: an optional `quizsmith.toml` file, overlaid
//! with `QUIZSMITH_*` environment variables (double-underscore separator,
//! e.g. `QUIZSMITH__PROVIDER__MODEL`). Every field has a default so the
//! tool runs with no configuration at all.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::QuizError;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use crate::quiz::DEFAULT_MAX_WORDS;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizsmithConfig {
    /// Generator selection and credentials
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline knobs
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Storage paths
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Questions requested when the CLI flag is omitted
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,

    /// Word budget for the normalized prompt body
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_num_questions() -> usize {
    10
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_questions: default_num_questions(),
            max_words: default_max_words(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Location of the sled quiz store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "quizsmith")
        .map(|dirs| dirs.data_dir().join("quizzes"))
        .unwrap_or_else(|| PathBuf::from(".quizsmith/quizzes"))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl QuizsmithConfig {
    /// Load configuration from an explicit file, or from `quizsmith.toml`
    /// in the working directory when none is given, with environment
    /// overrides applied on top.
    pub fn load(config_path: Option<&Path>) -> Result<Self, QuizError> {
        let mut builder = Config::builder();
        builder = match config_path {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name("quizsmith").required(false)),
        };
        builder = builder.add_source(Environment::with_prefix("QUIZSMITH").separator("__"));

        let config = builder
            .build()
            .map_err(|e| QuizError::ConfigError(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| QuizError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;

    #[test]
    fn defaults_cover_every_section() {
        let config = QuizsmithConfig::default();
        assert_eq!(config.provider.kind, ProviderKind::Gemini);
        assert_eq!(config.generation.num_questions, 10);
        assert_eq!(config.generation.max_words, DEFAULT_MAX_WORDS);
        assert!(!config.storage.store_path.as_os_str().is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("quizsmith.toml");
        std::fs::write(
            &path,
            "[provider]\nkind = \"ollama\"\nmodel = \"llama3\"\n\n[generation]\nnum_questions = 5\n",
        )
        .unwrap();

        let config = QuizsmithConfig::load(Some(&path)).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.generation.num_questions, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.generation.max_words, DEFAULT_MAX_WORDS);
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let config = QuizsmithConfig::load(None).unwrap();
        assert_eq!(config.generation.num_questions, 10);
    }
}

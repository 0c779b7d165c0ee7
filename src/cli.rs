//! CLI Tooling
//!
//! Command-line interface for quiz generation and playback. The interactive
//! play loop is the presentation layer: it only calls the named session
//! transitions and renders their results, so every rule lives in the core.

use clap::{Parser, Subcommand};
use comfy_table::Table;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::QuizsmithConfig;
use crate::error::QuizError;
use crate::extract::PlainTextExtractor;
use crate::pipeline::QuizPipeline;
use crate::provider::create_generator;
use crate::quiz::QuizId;
use crate::session::{QuizSession, Summary};
use crate::store::{QuizStore, SledQuizStore, StoredQuiz};

/// Quizsmith CLI - document-to-quiz generation and grading
#[derive(Parser)]
#[command(name = "quizsmith")]
#[command(about = "Turn slide decks and documents into graded multiple-choice quizzes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a quiz from a slide deck or document
    Generate {
        /// Source file (txt, md; pdf/pptx need a dedicated extractor)
        file: PathBuf,

        /// Number of questions to request (default from config)
        #[arg(long)]
        questions: Option<usize>,
    },
    /// Play a stored quiz interactively
    Play {
        /// Quiz id, as printed by generate
        quiz_id: String,
    },
    /// Print a stored quiz
    Show {
        /// Quiz id
        quiz_id: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Include answer keys and explanations
        #[arg(long)]
        answers: bool,
    },
    /// List stored quizzes
    List,
}

/// Everything a command execution needs: loaded config plus an open store.
pub struct RunContext {
    config: QuizsmithConfig,
    store: Arc<SledQuizStore>,
}

impl RunContext {
    pub fn new(config: QuizsmithConfig) -> Result<Self, QuizError> {
        let store = Arc::new(SledQuizStore::new(&config.storage.store_path)?);
        Ok(Self { config, store })
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, QuizError> {
        match command {
            Commands::Generate { file, questions } => self.generate(file, *questions).await,
            Commands::Play { quiz_id } => self.play(quiz_id),
            Commands::Show {
                quiz_id,
                format,
                answers,
            } => self.show(quiz_id, format, *answers),
            Commands::List => self.list(),
        }
    }

    async fn generate(&self, file: &PathBuf, questions: Option<usize>) -> Result<String, QuizError> {
        let num_questions = questions.unwrap_or(self.config.generation.num_questions);
        let generator = create_generator(&self.config.provider)?;
        info!(
            provider = generator.provider_name(),
            model = generator.model_name(),
            num_questions,
            "starting quiz generation"
        );

        let pipeline = QuizPipeline::new(
            Arc::new(PlainTextExtractor),
            generator.into(),
            self.store.clone(),
        )
        .with_max_words(self.config.generation.max_words);

        let stored = pipeline.generate_from_file(file, num_questions).await?;
        Ok(format!(
            "Quiz generated with {} questions.\nQuiz id: {}\nPlay it with: quizsmith play {}",
            stored.questions.len(),
            stored.id,
            stored.id
        ))
    }

    fn play(&self, quiz_id: &str) -> Result<String, QuizError> {
        let stored = self.load_quiz(quiz_id)?;
        let total = stored.questions.len();
        let mut session = QuizSession::new(stored.questions.into());

        while !session.is_done() {
            // Clone out of the borrow before the mutable transitions below.
            let Some(question) = session.current_question() else {
                break;
            };
            let (prompt, options) = (question.prompt().to_string(), question.options().to_vec());
            println!();
            println!("Question {}/{}", session.current_index() + 1, total);
            println!("{prompt}");

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Choose your answer")
                .items(&options)
                .default(0)
                .interact()
                .map_err(|e| QuizError::Terminal(e.to_string()))?;

            let outcome = session.submit(selection)?;
            if outcome.correct {
                println!("{}", "Correct!".green().bold());
            } else {
                println!("{}", "Incorrect!".red().bold());
            }

            let show_explanation = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Show explanation?")
                .default(false)
                .interact()
                .map_err(|e| QuizError::Terminal(e.to_string()))?;
            if show_explanation {
                let explanation = session.reveal_explanation()?;
                println!("Explanation: {explanation}");
            }

            session.advance()?;
        }

        let summary = session.summary();
        Ok(format!("Quiz completed!\n{}", summary_table(&summary)))
    }

    fn show(&self, quiz_id: &str, format: &str, answers: bool) -> Result<String, QuizError> {
        let stored = self.load_quiz(quiz_id)?;
        match format {
            "json" => Ok(serde_json::to_string_pretty(&stored)?),
            "text" => {
                let mut out = format!("Quiz {} ({} questions)\n", stored.id, stored.questions.len());
                for (i, question) in stored.questions.iter().enumerate() {
                    out.push_str(&format!("\nQ{}: {}\n", i + 1, question.prompt()));
                    for (label, option) in ["A", "B", "C", "D"].iter().zip(question.options()) {
                        out.push_str(&format!("  {label}) {option}\n"));
                    }
                    if answers {
                        let label = ["A", "B", "C", "D"][question.correct_index()];
                        out.push_str(&format!("  Answer: {label}\n"));
                        out.push_str(&format!("  Explanation: {}\n", question.explanation()));
                    }
                }
                Ok(out)
            }
            other => Err(QuizError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn list(&self) -> Result<String, QuizError> {
        let quizzes = self.store.list()?;
        if quizzes.is_empty() {
            return Ok("No quizzes stored yet. Generate one with: quizsmith generate <file>".into());
        }
        let mut table = Table::new();
        table.set_header(vec!["Quiz id", "Questions", "Source", "Created"]);
        for quiz in quizzes {
            table.add_row(vec![
                quiz.id.to_string(),
                quiz.questions.len().to_string(),
                quiz.source.unwrap_or_else(|| "-".to_string()),
                quiz.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ]);
        }
        Ok(table.to_string())
    }

    fn load_quiz(&self, quiz_id: &str) -> Result<StoredQuiz, QuizError> {
        self.store
            .get(&QuizId::new(quiz_id))?
            .ok_or_else(|| QuizError::QuizNotFound(quiz_id.to_string()))
    }
}

fn summary_table(summary: &Summary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Total", "Attempted", "Correct", "Wrong", "Score"]);
    table.add_row(vec![
        summary.total.to_string(),
        summary.attempted.to_string(),
        summary.correct.to_string(),
        summary.wrong.to_string(),
        format!("{:.2}%", summary.percent),
    ]);
    table.to_string()
}

/// Map errors onto the user-facing messages the terminal shows.
pub fn map_error(error: &QuizError) -> String {
    match error {
        QuizError::NoTextExtracted => {
            "Cannot generate a quiz from this file. Try a different file.".to_string()
        }
        QuizError::GenerationFailed => {
            "Could not generate questions. Try a different file or fewer questions.".to_string()
        }
        QuizError::QuizNotFound(id) => {
            format!("Quiz '{id}' not found. Generate a new quiz and use its id.")
        }
        QuizError::ProviderNotConfigured(msg) => format!("Provider not configured: {msg}"),
        QuizError::ProviderAuthFailed(_) => {
            "Provider authentication failed. Check your API key.".to_string()
        }
        QuizError::ProviderRateLimit(_) => {
            "Provider rate limit exceeded. Try again in a moment.".to_string()
        }
        other => other.to_string(),
    }
}

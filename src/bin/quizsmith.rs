//! Quizsmith CLI Binary
//!
//! Command-line interface for generating and playing quizzes.

use clap::Parser;
use quizsmith::cli::{map_error, Cli, RunContext};
use quizsmith::config::QuizsmithConfig;
use quizsmith::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match QuizsmithConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("quizsmith starting");

    let context = match RunContext::new(config) {
        Ok(context) => context,
        Err(e) => {
            error!("Error opening quiz store: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command).await {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli, config: &QuizsmithConfig) -> LoggingConfig {
    // Without --verbose the terminal stays quiet apart from command output.
    if !cli.verbose && cli.log_level.is_none() {
        let mut logging = config.logging.clone();
        logging.level = "off".to_string();
        return logging;
    }

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

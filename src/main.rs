//! Overflow-Harvest main entry point
//!
//! Command-line front end: each sub-command maps onto one harvester operation
//! and prints its records as JSON on stdout. Logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use overflow_harvest::config::{load_config_with_hash, Config};
use overflow_harvest::{HarvestError, Harvester};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Overflow-Harvest: republishes a Q&A site's pages as JSON records
#[derive(Parser, Debug)]
#[command(name = "overflow-harvest")]
#[command(version)]
#[command(about = "Harvest collectives, questions and answers as JSON", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every collective with its tags and external links
    Collectives,

    /// List one page of questions
    Questions {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 30)]
        pagesize: u32,

        /// Up to three tags separated by ';', all of which must match
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Fetch one question by id
    Question { question_id: u64 },

    /// Fetch every answer to a question
    Answers { question_id: u64 },

    /// Fetch the answers on the page an answer id leads to
    Answer { answer_id: u64 },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_ref())?;
    let harvester =
        Harvester::from_config(&config).context("Failed to initialize the harvester")?;

    let printed = match cli.command {
        Command::Collectives => print_result(harvester.list_collectives().await),
        Command::Questions {
            page,
            pagesize,
            tags,
        } => {
            let tags: Vec<&str> = tags.split(';').collect();
            match harvester.list_questions(page, pagesize, &tags).await {
                Ok(questions) if questions.is_empty() => print_error(
                    "No questions found or error occurred during scraping".to_string(),
                ),
                result => print_result(result),
            }
        }
        Command::Question { question_id } => print_result(harvester.get_question(question_id).await),
        Command::Answers { question_id } => print_result(harvester.get_answers(question_id).await),
        Command::Answer { answer_id } => print_result(harvester.get_answer(answer_id).await),
    }?;

    Ok(if printed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Loads the configuration file, or falls back to defaults
fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Prints records, or the error body for a failed operation
///
/// Returns whether the operation succeeded.
fn print_result<T: Serialize>(result: overflow_harvest::Result<T>) -> anyhow::Result<bool> {
    match result {
        Ok(records) => {
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(true)
        }
        Err(e @ HarvestError::NotFound { .. }) => print_error(e.to_string()),
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            print_error(e.to_string())
        }
    }
}

fn print_error(message: String) -> anyhow::Result<bool> {
    println!(
        "{}",
        serde_json::to_string_pretty(&ErrorBody { error: message })?
    );
    Ok(false)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("overflow_harvest=info,warn"),
            1 => EnvFilter::new("overflow_harvest=debug,info"),
            2 => EnvFilter::new("overflow_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::MAX_TOP_N;
use clap::Parser;
use std::path::PathBuf;

/// CorpusDash - entity and keyword analytics for two news corpora
///
/// Loads the Macron/France and Poutine/Russie corpora, applies the
/// selected filters and writes every dashboard chart as a Markdown or
/// JSON report.
///
/// Examples:
///   corpusdash
///   corpusdash --corpus Poutine/Russie --period last6 --top-n 10
///   corpusdash --category persons --focus ukraine --seed 42 --format json
///   corpusdash --check
///   corpusdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Corpus to analyze: Macron/France, Poutine/Russie or Combined
    #[arg(long, value_name = "NAME", env = "CORPUSDASH_CORPUS")]
    pub corpus: Option<String>,

    /// Time period: all, a year (e.g. 2024), last6 or last3
    #[arg(short, long, value_name = "PERIOD")]
    pub period: Option<String>,

    /// Entity category for the main ranking
    ///
    /// Values: keywords, locations, organizations, persons
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Number of entities in rankings
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub top_n: Option<usize>,

    /// Keyword at the center of the word network
    #[arg(short, long, value_name = "WORD")]
    pub focus: Option<String>,

    /// Seed for the actor/location matrix (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to the Macron/France corpus JSON
    #[arg(long, value_name = "FILE")]
    pub macron: Option<PathBuf>,

    /// Path to the Poutine/Russie corpus JSON
    #[arg(long, value_name = "FILE")]
    pub poutine: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .corpusdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file path for the report
    #[arg(
        short,
        long,
        default_value = "dashboard_report.md",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Check that both data files load, print a summary and exit
    #[arg(long)]
    pub check: bool,

    /// Generate a default .corpusdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    ///
    /// Corpus, period and category names are checked later, when the
    /// selection is built, so that a bad value yields a placeholder report
    /// instead of an error.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(top_n) = self.top_n {
            if top_n == 0 || top_n > MAX_TOP_N {
                return Err(format!("Top-N must be between 1 and {}", MAX_TOP_N));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

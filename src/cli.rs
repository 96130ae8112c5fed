//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Explainable keyword matching of resumes against job descriptions")]
#[command(long_about = "Score how well a resume covers the keywords of a job description using TF-IDF weighting, with exact and partial matches explained")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobArgs,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include weights, extra keywords and the full explanation
        #[arg(short, long)]
        detailed: bool,

        /// Store the report in the results directory for the dashboard
        #[arg(long)]
        record: bool,
    },

    /// Summarize previously recorded analyses
    Dashboard {
        /// Results directory (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Number of most common missing skills to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// History entries to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// History entries to show
        #[arg(long, default_value_t = 10)]
        history: usize,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobArgs {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description passed inline
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

//! Resume matcher: explainable keyword matching of resumes against job descriptions

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, JobArgs};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::dashboard::{DashboardHistory, DashboardSummary, ReportStore};
use resume_matcher::input::file_detector::{DocumentRole, FileType};
use resume_matcher::input::manager::{InputManager, InputSource};
use resume_matcher::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_matcher::output::report::AnalysisReport;
use resume_matcher::{MatcherError, MatchingEngine, Result};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            record,
        } => {
            info!("Starting resume match analysis");

            cli::validate_file_extension(&resume, FileType::accepted_extensions(DocumentRole::Resume))
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let job_source = job_source(job)?;
            let resume_source = InputSource::File(resume);
            let resume_label = resume_source.label();

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.load(&resume_source, DocumentRole::Resume).await?;
            let job_text = input_manager.load(&job_source, DocumentRole::JobDescription).await?;

            let engine = MatchingEngine::from_config(
                &config.engine,
                &config.scoring,
                config.output.explanation_limit,
            );
            let outcome = engine.analyze(&resume_text, &job_text);
            info!(
                "Match score {:.2}% ({} of {} job keywords matched)",
                outcome.match_score,
                outcome.matched_keywords.len(),
                outcome.job_keyword_count
            );

            let report = AnalysisReport::new(outcome, resume_label.clone(), job_source.label());

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match &save {
                Some(save) => {
                    let path = resolve_save_path(save, output_format, &resume_label);
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if record {
                let store = ReportStore::new(&config.dashboard.results_dir);
                let path = store.save(&report).await?;
                println!("📁 Analysis recorded at {}", path.display());
            }
        }

        Commands::Dashboard {
            dir,
            limit,
            skip,
            history,
            output,
        } => {
            let output_format = cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;
            if !matches!(output_format, OutputFormat::Console | OutputFormat::Json) {
                return Err(MatcherError::InvalidInput(format!(
                    "Dashboard output must be console or json, got {}",
                    output
                )));
            }

            let store = ReportStore::new(dir.unwrap_or_else(|| config.dashboard.results_dir.clone()));
            let reports = store.load_all().await?;
            info!("Loaded {} reports from {}", reports.len(), store.dir().display());

            let summary = DashboardSummary::from_reports(
                &reports,
                limit.unwrap_or(config.dashboard.top_missing_skills),
            );
            let history = DashboardHistory::from_reports(&reports, skip, history);

            let generator = ReportGenerator::with_options(config.output.color_output, false, true, true, true);
            println!("{}", generator.generate_dashboard(&summary, &history, output_format)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| MatcherError::Configuration(e.to_string()))?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let path = Config::reset(config_file.as_deref())?;
                println!("✅ Configuration reset successfully! ({})", path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::resolve_path(config_file.as_deref()).display());
            }
        },
    }

    Ok(())
}

fn job_source(job: JobArgs) -> Result<InputSource> {
    match (job.job, job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(&path, FileType::accepted_extensions(DocumentRole::JobDescription))
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            Ok(InputSource::File(path))
        }
        (None, Some(text)) => Ok(InputSource::Inline(text)),
        (None, None) => Err(MatcherError::InvalidInput(
            "Provide a job description with --job or --job-text".to_string(),
        )),
    }
}

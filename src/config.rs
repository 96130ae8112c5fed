//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use crate::processing::keywords::PRESERVED_TERMS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shortest term (in characters) that may become a keyword
    pub min_keyword_length: usize,
    /// Keywords kept per document, 0 keeps all
    pub max_keywords: usize,
    /// Shortest string allowed on the short side of a substring match
    pub min_partial_length: usize,
    pub additional_stop_words: Vec<String>,
    /// Short technical terms kept regardless of `min_keyword_length`
    pub preserved_terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub strong_match_threshold: f64,
    pub moderate_match_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    /// Entries listed per section of the explanation
    pub explanation_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub results_dir: PathBuf,
    pub top_missing_skills: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let results_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("results");

        Self {
            engine: EngineConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                explanation_limit: 10,
            },
            dashboard: DashboardConfig {
                results_dir,
                top_missing_skills: 10,
            },
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_keyword_length: 3,
            max_keywords: 50,
            min_partial_length: 3,
            additional_stop_words: Vec::new(),
            preserved_terms: PRESERVED_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: 70.0,
            moderate_match_threshold: 50.0,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the per-user location (written
    /// with defaults when absent).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    /// The file `load` reads for the given override
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    /// Overwrite the file at `path` (or the per-user default) with defaults
    pub fn reset(path: Option<&Path>) -> Result<PathBuf> {
        let target = Self::resolve_path(path);
        Self::default().save_to(&target)?;
        Ok(target)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            MatcherError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        for (name, value) in [
            ("strong_match_threshold", scoring.strong_match_threshold),
            ("moderate_match_threshold", scoring.moderate_match_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(MatcherError::Configuration(format!(
                    "scoring.{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }

        if scoring.strong_match_threshold < scoring.moderate_match_threshold {
            return Err(MatcherError::Configuration(
                "scoring.strong_match_threshold must not be below moderate_match_threshold".to_string(),
            ));
        }

        if self.engine.min_keyword_length == 0 {
            return Err(MatcherError::Configuration(
                "engine.min_keyword_length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

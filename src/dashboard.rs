//! Dashboard over saved analysis reports
//!
//! Reports are stored as one JSON file each. The summary gives count,
//! average/highest/lowest score and the most common missing skills; the
//! history lists past analyses newest first.

use crate::error::{MatcherError, Result};
use crate::output::report::AnalysisReport;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkillStat {
    pub skill: String,
    pub count: usize,
    /// Share of all missing-skill occurrences, in percent
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_analyses: usize,
    pub average_match_score: f64,
    pub highest_match_score: f64,
    pub lowest_match_score: f64,
    pub most_common_missing_skills: Vec<MissingSkillStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardHistory {
    pub analyses: Vec<HistoryItem>,
    pub total: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl DashboardSummary {
    pub fn from_reports(reports: &[AnalysisReport], skill_limit: usize) -> Self {
        if reports.is_empty() {
            return Self {
                total_analyses: 0,
                average_match_score: 0.0,
                highest_match_score: 0.0,
                lowest_match_score: 0.0,
                most_common_missing_skills: Vec::new(),
            };
        }

        let scores: Vec<f64> = reports.iter().map(AnalysisReport::score).collect();
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let highest = scores.iter().copied().fold(f64::MIN, f64::max);
        let lowest = scores.iter().copied().fold(f64::MAX, f64::min);

        Self {
            total_analyses: reports.len(),
            average_match_score: round2(average),
            highest_match_score: round2(highest),
            lowest_match_score: round2(lowest),
            most_common_missing_skills: missing_skill_stats(reports, skill_limit),
        }
    }
}

fn missing_skill_stats(reports: &[AnalysisReport], limit: usize) -> Vec<MissingSkillStat> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for report in reports {
        for skill in &report.outcome.missing_keywords {
            *counts.entry(skill.as_str()).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(skill, count)| MissingSkillStat {
            skill: skill.to_string(),
            count,
            frequency: round2(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

impl DashboardHistory {
    /// Page of past analyses, newest first
    pub fn from_reports(reports: &[AnalysisReport], skip: usize, limit: usize) -> Self {
        let mut ordered: Vec<&AnalysisReport> = reports.iter().collect();
        ordered.sort_by(|a, b| b.metadata.generated_at.cmp(&a.metadata.generated_at));

        let analyses = ordered
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|report| HistoryItem {
                generated_at: report.metadata.generated_at,
                resume_source: report.metadata.resume_source.clone(),
                job_source: report.metadata.job_source.clone(),
                match_score: report.score(),
            })
            .collect();

        Self {
            analyses,
            total: reports.len(),
        }
    }
}

/// Directory of saved `AnalysisReport` JSON files
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a report and return the file it landed in
    pub async fn save(&self, report: &AnalysisReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;

        let stem = format!(
            "analysis_{}",
            report.metadata.generated_at.format("%Y%m%d_%H%M%S_%f")
        );
        let mut path = self.dir.join(format!("{}.json", stem));
        let mut suffix = 1;
        while fs::try_exists(&path).await? {
            path = self.dir.join(format!("{}_{}.json", stem, suffix));
            suffix += 1;
        }

        let content = serde_json::to_string_pretty(report)?;
        fs::write(&path, content).await?;
        info!("Saved analysis report to {}", path.display());
        Ok(path)
    }

    /// Every readable report in the directory; unreadable files are skipped
    pub async fn load_all(&self) -> Result<Vec<AnalysisReport>> {
        if !fs::try_exists(&self.dir).await? {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            MatcherError::Report(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut reports = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable report {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<AnalysisReport>(&content) {
                Ok(report) => reports.push(report),
                Err(e) => warn!("Skipping unreadable report {}: {}", path.display(), e),
            }
        }

        reports.sort_by(|a, b| b.metadata.generated_at.cmp(&a.metadata.generated_at));
        Ok(reports)
    }
}

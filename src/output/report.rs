//! Analysis report: an engine outcome plus where and when it was produced

use crate::processing::engine::AnalysisOutcome;
use crate::processing::explanation::MatchTier;
use crate::processing::matcher::{rank_matches, MatchEntry, MatchType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub version: String,
}

/// The unit that gets rendered, saved and aggregated by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub outcome: AnalysisOutcome,
}

impl AnalysisReport {
    pub fn new(outcome: AnalysisOutcome, resume_source: impl Into<String>, job_source: impl Into<String>) -> Self {
        Self::generated_at(outcome, resume_source, job_source, Utc::now())
    }

    pub fn generated_at(
        outcome: AnalysisOutcome,
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at,
                resume_source: resume_source.into(),
                job_source: job_source.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            outcome,
        }
    }

    pub fn score(&self) -> f64 {
        self.outcome.match_score
    }

    pub fn tier(&self) -> MatchTier {
        self.outcome.tier
    }

    /// Matched keywords ordered by descending contribution
    pub fn ranked_matches(&self) -> Vec<(&String, &MatchEntry)> {
        rank_matches(&self.outcome.matched_keywords)
    }

    pub fn exact_match_count(&self) -> usize {
        self.count_matches(MatchType::Exact)
    }

    pub fn partial_match_count(&self) -> usize {
        self.count_matches(MatchType::Partial)
    }

    fn count_matches(&self, match_type: MatchType) -> usize {
        self.outcome
            .matched_keywords
            .values()
            .filter(|entry| entry.match_type == match_type)
            .count()
    }
}

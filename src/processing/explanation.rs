//! Human-readable explanation of a match outcome

use crate::processing::matcher::{KeywordMatches, MatchType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Strong,
    Moderate,
    Weak,
}

impl MatchTier {
    pub fn recommendation(&self) -> &'static str {
        match self {
            MatchTier::Strong => "Strong match! Your resume aligns well with the job requirements.",
            MatchTier::Moderate => {
                "Moderate match. Consider highlighting the missing skills in your resume."
            }
            MatchTier::Weak => {
                "Weak match. Consider gaining experience with the missing skills or emphasizing transferable skills."
            }
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchTier::Strong => write!(f, "Strong"),
            MatchTier::Moderate => write!(f, "Moderate"),
            MatchTier::Weak => write!(f, "Weak"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplanationGenerator {
    strong_threshold: f64,
    moderate_threshold: f64,
    listing_limit: usize,
}

impl Default for ExplanationGenerator {
    fn default() -> Self {
        Self::new(70.0, 50.0, 10)
    }
}

impl ExplanationGenerator {
    pub fn new(strong_threshold: f64, moderate_threshold: f64, listing_limit: usize) -> Self {
        Self {
            strong_threshold,
            moderate_threshold,
            listing_limit,
        }
    }

    pub fn tier(&self, score: f64) -> MatchTier {
        if score >= self.strong_threshold {
            MatchTier::Strong
        } else if score >= self.moderate_threshold {
            MatchTier::Moderate
        } else {
            MatchTier::Weak
        }
    }

    pub fn generate(&self, score: f64, matches: &KeywordMatches) -> String {
        let mut parts = Vec::new();

        parts.push(format!("Match Score: {:.2}%\n\n", score));

        let ranked = matches.ranked();
        if ranked.is_empty() {
            parts.push("❌ No skills matched.\n".to_string());
        } else {
            parts.push("✅ Matched Skills:\n".to_string());
            for (job_keyword, entry) in ranked.iter().take(self.listing_limit) {
                let line = match entry.match_type {
                    MatchType::Exact => format!(
                        "  • {} (exact match, importance: {:.2})\n",
                        job_keyword, entry.weight
                    ),
                    MatchType::Partial => format!(
                        "  • {} (partial match with '{}', similarity: {:.2}, importance: {:.2})\n",
                        job_keyword, entry.resume_keyword, entry.similarity, entry.weight
                    ),
                };
                parts.push(line);
            }
            if let Some(more) = self.overflow_line(ranked.len(), "matches") {
                parts.push(more);
            }
        }

        if !matches.missing.is_empty() {
            parts.push("\n⚠️ Missing Skills:\n".to_string());
            for keyword in matches.missing.iter().take(self.listing_limit) {
                parts.push(format!("  • {}\n", keyword));
            }
            if let Some(more) = self.overflow_line(matches.missing.len(), "missing") {
                parts.push(more);
            }
        }

        parts.push("\n💡 Recommendations:\n".to_string());
        parts.push(format!("  • {}\n", self.tier(score).recommendation()));

        parts.concat()
    }

    fn overflow_line(&self, total: usize, label: &str) -> Option<String> {
        (total > self.listing_limit).then(|| format!("  ... and {} more {}\n", total - self.listing_limit, label))
    }
}

//! Overall match score from weighted keyword contributions

use crate::processing::keywords::DocumentKeywords;
use crate::processing::matcher::MatchEntry;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Weighted share of the job description covered by the resume, in [0, 100].
    ///
    /// Each job keyword adds `similarity * weight` when matched; the sum is
    /// divided by the total job weight. Both sums walk the job keywords in
    /// the same order, so a full set of exact matches scores exactly 100.
    pub fn calculate(&self, job: &DocumentKeywords, matched: &BTreeMap<String, MatchEntry>) -> f64 {
        let mut total_weight = 0.0;
        let mut achieved = 0.0;

        for keyword in job {
            total_weight += keyword.weight;
            if let Some(entry) = matched.get(&keyword.term) {
                achieved += entry.similarity * keyword.weight;
            }
        }

        if job.is_empty() || total_weight <= 0.0 {
            return 0.0;
        }

        let percentage = (achieved / total_weight * 100.0).clamp(0.0, 100.0);
        (percentage * 100.0).round() / 100.0
    }
}

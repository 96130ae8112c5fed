//! Exact and partial keyword matching of job keywords against resume keywords

use crate::processing::keywords::{DocumentKeywords, KeywordWeight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Partial => write!(f, "partial"),
        }
    }
}

/// Best resume keyword found for one job keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub resume_keyword: String,
    /// 1.0 for exact matches, shorter/longer length ratio for partial ones
    pub similarity: f64,
    pub match_type: MatchType,
    /// TF-IDF weight of the job keyword
    pub weight: f64,
    /// `similarity * weight`
    pub contribution: f64,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordMatches {
    /// Keyed by job keyword
    pub matched: BTreeMap<String, MatchEntry>,
    /// Job keywords without a match, most important first
    pub missing: Vec<String>,
    /// Resume keywords unrelated to every job keyword
    pub extra: Vec<String>,
}

impl KeywordMatches {
    pub fn ranked(&self) -> Vec<(&String, &MatchEntry)> {
        rank_matches(&self.matched)
    }
}

/// Matched entries ordered by descending contribution, then job keyword
pub fn rank_matches(matched: &BTreeMap<String, MatchEntry>) -> Vec<(&String, &MatchEntry)> {
    let mut ranked: Vec<(&String, &MatchEntry)> = matched.iter().collect();
    ranked.sort_by(|a, b| b.1.contribution.total_cmp(&a.1.contribution).then_with(|| a.0.cmp(b.0)));
    ranked
}

struct PartialCandidate<'a> {
    keyword: &'a KeywordWeight,
    similarity: f64,
}

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    min_partial_length: usize,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(3)
    }
}

impl KeywordMatcher {
    pub fn new(min_partial_length: usize) -> Self {
        Self { min_partial_length }
    }

    pub fn min_partial_length(&self) -> usize {
        self.min_partial_length
    }

    /// Match every job keyword against the resume keywords.
    ///
    /// Each job keyword lands in exactly one of `matched` or `missing`.
    pub fn match_keywords(&self, resume: &DocumentKeywords, job: &DocumentKeywords) -> KeywordMatches {
        let mut matches = KeywordMatches::default();

        for job_keyword in job {
            match self.best_match(job_keyword, resume) {
                Some(entry) => {
                    matches.matched.insert(job_keyword.term.clone(), entry);
                }
                None => matches.missing.push(job_keyword.term.clone()),
            }
        }

        matches.extra = resume
            .iter()
            .filter(|resume_keyword| {
                !job.iter()
                    .any(|job_keyword| self.related(&job_keyword.term, &resume_keyword.term))
            })
            .map(|resume_keyword| resume_keyword.term.clone())
            .collect();

        matches
    }

    /// Exact match when available, otherwise the strongest partial match
    pub fn best_match(&self, job_keyword: &KeywordWeight, resume: &DocumentKeywords) -> Option<MatchEntry> {
        if let Some(resume_keyword) = resume.get(&job_keyword.term) {
            return Some(MatchEntry {
                resume_keyword: resume_keyword.term.clone(),
                similarity: 1.0,
                match_type: MatchType::Exact,
                weight: job_keyword.weight,
                contribution: job_keyword.weight,
            });
        }

        let mut best: Option<PartialCandidate> = None;
        for resume_keyword in resume {
            let Some(similarity) = self.partial_similarity(&job_keyword.term, &resume_keyword.term) else {
                continue;
            };

            // Strict comparisons keep the earliest candidate on a full tie
            let better = match &best {
                None => true,
                Some(current) => {
                    similarity > current.similarity
                        || (similarity == current.similarity && resume_keyword.weight > current.keyword.weight)
                }
            };
            if better {
                best = Some(PartialCandidate {
                    keyword: resume_keyword,
                    similarity,
                });
            }
        }

        best.map(|candidate| MatchEntry {
            resume_keyword: candidate.keyword.term.clone(),
            similarity: candidate.similarity,
            match_type: MatchType::Partial,
            weight: job_keyword.weight,
            contribution: candidate.similarity * job_keyword.weight,
        })
    }

    /// Length ratio when one term contains the other, `None` otherwise
    pub fn partial_similarity(&self, job_term: &str, resume_term: &str) -> Option<f64> {
        if job_term == resume_term {
            return None;
        }

        let (shorter, longer) = if job_term.chars().count() <= resume_term.chars().count() {
            (job_term, resume_term)
        } else {
            (resume_term, job_term)
        };

        let shorter_len = shorter.chars().count();
        if shorter_len == 0 || shorter_len < self.min_partial_length || !longer.contains(shorter) {
            return None;
        }

        Some(shorter_len as f64 / longer.chars().count() as f64)
    }

    fn related(&self, job_term: &str, resume_term: &str) -> bool {
        job_term == resume_term || self.partial_similarity(job_term, resume_term).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::keywords::KeywordExtractor;

    fn keywords(pairs: &[(&str, usize)]) -> DocumentKeywords {
        // Repeat terms to produce the requested relative weights
        let tokens: Vec<String> = pairs
            .iter()
            .flat_map(|(term, count)| std::iter::repeat(term.to_string()).take(*count))
            .collect();
        let extractor = KeywordExtractor::new(1, 0, std::iter::empty::<&str>());
        extractor.extract_pair(&tokens, &[]).0
    }

    fn job_keyword(term: &str, weight: f64) -> KeywordWeight {
        KeywordWeight {
            term: term.to_string(),
            weight,
        }
    }

    #[test]
    fn test_exact_match() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("python", 2), ("django", 1)]);

        let entry = matcher.best_match(&job_keyword("python", 0.4), &resume).unwrap();
        assert_eq!(entry.match_type, MatchType::Exact);
        assert_eq!(entry.similarity, 1.0);
        assert_eq!(entry.resume_keyword, "python");
        assert_eq!(entry.contribution, 0.4);
    }

    #[test]
    fn test_partial_match_uses_length_ratio() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("postgresql", 1)]);

        let entry = matcher.best_match(&job_keyword("sql", 0.5), &resume).unwrap();
        assert_eq!(entry.match_type, MatchType::Partial);
        assert!((entry.similarity - 0.3).abs() < 1e-12);
        assert!((entry.contribution - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_partial_match_either_direction() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("react", 1)]);

        let entry = matcher.best_match(&job_keyword("reactjs", 0.5), &resume).unwrap();
        assert_eq!(entry.resume_keyword, "react");
        assert!((entry.similarity - 5.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_javascript_does_not_match_js() {
        let matcher = KeywordMatcher::new(1);
        let resume = keywords(&[("js", 1)]);

        assert!(matcher.best_match(&job_keyword("javascript", 0.5), &resume).is_none());
    }

    #[test]
    fn test_short_substrings_ignored() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("google", 1)]);

        assert!(matcher.best_match(&job_keyword("go", 0.5), &resume).is_none());
        assert!(KeywordMatcher::new(2).best_match(&job_keyword("go", 0.5), &resume).is_some());
    }

    #[test]
    fn test_partial_prefers_highest_similarity() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("kubernetes-operators", 3), ("kubernetes-ops", 1)]);

        let entry = matcher.best_match(&job_keyword("kubernetes", 0.5), &resume).unwrap();
        assert_eq!(entry.resume_keyword, "kubernetes-ops");
    }

    #[test]
    fn test_partial_tie_prefers_heavier_resume_keyword() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("rustc", 1), ("rusty", 2)]);

        let entry = matcher.best_match(&job_keyword("rust", 0.5), &resume).unwrap();
        assert_eq!(entry.resume_keyword, "rusty");
    }

    #[test]
    fn test_partial_full_tie_prefers_earliest() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("rustc", 1), ("rusty", 1)]);

        let entry = matcher.best_match(&job_keyword("rust", 0.5), &resume).unwrap();
        assert_eq!(entry.resume_keyword, "rustc");
    }

    #[test]
    fn test_partition_and_extra_keywords() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("python", 1), ("postgresql", 1), ("cooking", 1)]);
        let job = keywords(&[("python", 1), ("sql", 1), ("django", 1)]);

        let matches = matcher.match_keywords(&resume, &job);

        assert_eq!(matches.matched.len(), 2);
        assert_eq!(matches.matched["python"].match_type, MatchType::Exact);
        assert_eq!(matches.matched["sql"].match_type, MatchType::Partial);
        assert_eq!(matches.missing, vec!["django"]);
        assert_eq!(matches.extra, vec!["cooking"]);

        for term in job.terms() {
            assert!(matches.matched.contains_key(term) ^ matches.missing.iter().any(|m| m == term));
        }
    }

    #[test]
    fn test_ranked_orders_by_contribution() {
        let matcher = KeywordMatcher::default();
        let resume = keywords(&[("python", 1), ("postgresql", 1)]);
        let job = keywords(&[("python", 1), ("sql", 4)]);

        let matches = matcher.match_keywords(&resume, &job);
        let ranked: Vec<&str> = matches.ranked().iter().map(|(term, _)| term.as_str()).collect();

        // sql weighs four times python and matches at 0.3 similarity
        assert_eq!(ranked, vec!["sql", "python"]);
    }
}

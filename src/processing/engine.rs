//! The matching engine: resume text + job description text -> explainable outcome

use crate::config::{EngineConfig, ScoringConfig};
use crate::processing::explanation::{ExplanationGenerator, MatchTier};
use crate::processing::keywords::KeywordExtractor;
use crate::processing::matcher::{KeywordMatcher, MatchEntry};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::scoring::ScoreCalculator;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one analysis produces. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Weighted keyword coverage, 0-100
    pub match_score: f64,
    pub tier: MatchTier,
    pub matched_keywords: BTreeMap<String, MatchEntry>,
    /// Unmatched job keywords, most important first
    pub missing_keywords: Vec<String>,
    pub extra_keywords: Vec<String>,
    pub explanation: String,
    pub resume_keyword_count: usize,
    pub job_keyword_count: usize,
}

/// Stateless engine; build once and share freely between threads.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    normalizer: TextNormalizer,
    extractor: KeywordExtractor,
    matcher: KeywordMatcher,
    scorer: ScoreCalculator,
    explainer: ExplanationGenerator,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(engine: &EngineConfig, scoring: &ScoringConfig, explanation_limit: usize) -> Self {
        Self {
            normalizer: TextNormalizer::with_additional_stop_words(&engine.additional_stop_words),
            extractor: KeywordExtractor::new(
                engine.min_keyword_length,
                engine.max_keywords,
                &engine.preserved_terms,
            ),
            matcher: KeywordMatcher::new(engine.min_partial_length),
            scorer: ScoreCalculator::new(),
            explainer: ExplanationGenerator::new(
                scoring.strong_match_threshold,
                scoring.moderate_match_threshold,
                explanation_limit,
            ),
        }
    }

    /// Analyze a resume against a job description.
    ///
    /// Total over all inputs: empty or whitespace-only text yields no
    /// keywords for that document and, for the job side, a score of 0.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> AnalysisOutcome {
        let resume_tokens = self.normalizer.tokenize(resume_text);
        let job_tokens = self.normalizer.tokenize(job_text);

        let (resume_keywords, job_keywords) = self.extractor.extract_pair(&resume_tokens, &job_tokens);
        debug!(
            "Extracted {} resume keywords from {} tokens, {} job keywords from {} tokens",
            resume_keywords.len(),
            resume_tokens.len(),
            job_keywords.len(),
            job_tokens.len()
        );

        let matches = self.matcher.match_keywords(&resume_keywords, &job_keywords);
        let match_score = self.scorer.calculate(&job_keywords, &matches.matched);
        let tier = self.explainer.tier(match_score);
        let explanation = self.explainer.generate(match_score, &matches);

        debug!(
            "Match score {:.2} ({} matched, {} missing)",
            match_score,
            matches.matched.len(),
            matches.missing.len()
        );

        AnalysisOutcome {
            match_score,
            tier,
            matched_keywords: matches.matched,
            missing_keywords: matches.missing,
            extra_keywords: matches.extra,
            explanation,
            resume_keyword_count: resume_keywords.len(),
            job_keyword_count: job_keywords.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::matcher::MatchType;

    const RESUME: &str = "Software Engineer with 5 years of experience in Python and Django.
        Strong background in web development using React and JavaScript.
        Experience with PostgreSQL and SQL databases.";

    const JOB: &str = "We are looking for a Python developer with Django experience.
        Must have knowledge of SQL and database design.
        Experience with React is a plus.";

    fn assert_partition(outcome: &AnalysisOutcome) {
        assert_eq!(
            outcome.matched_keywords.len() + outcome.missing_keywords.len(),
            outcome.job_keyword_count
        );
        for missing in &outcome.missing_keywords {
            assert!(!outcome.matched_keywords.contains_key(missing));
        }
    }

    #[test]
    fn test_complete_flow() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze(RESUME, JOB);

        assert!(outcome.match_score > 0.0 && outcome.match_score <= 100.0);
        assert_eq!(outcome.matched_keywords["python"].match_type, MatchType::Exact);
        assert_eq!(outcome.matched_keywords["django"].match_type, MatchType::Exact);
        assert_eq!(outcome.matched_keywords["sql"].match_type, MatchType::Exact);
        assert_eq!(outcome.matched_keywords["react"].match_type, MatchType::Exact);
        assert!(outcome.missing_keywords.contains(&"looking".to_string()));
        assert!(outcome.explanation.contains("Match Score"));
        assert_partition(&outcome);
    }

    #[test]
    fn test_identical_texts_score_hundred() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze(JOB, JOB);

        assert_eq!(outcome.match_score, 100.0);
        assert_eq!(outcome.tier, MatchTier::Strong);
        assert!(outcome.missing_keywords.is_empty());
        assert!(outcome
            .matched_keywords
            .values()
            .all(|entry| entry.match_type == MatchType::Exact));
        assert_partition(&outcome);
    }

    #[test]
    fn test_identical_after_normalization() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze("PYTHON, Django!!", "python django");

        assert_eq!(outcome.match_score, 100.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze(
            "Chef with experience in French cuisine and pastry.",
            "Rust programmer needed for kernel hacking.",
        );

        assert_eq!(outcome.match_score, 0.0);
        assert!(outcome.matched_keywords.is_empty());
        assert_eq!(outcome.missing_keywords.len(), outcome.job_keyword_count);
        assert_eq!(outcome.tier, MatchTier::Weak);
    }

    #[test]
    fn test_one_matched_one_missing() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze("python", "python django");

        assert_eq!(outcome.matched_keywords["python"].match_type, MatchType::Exact);
        assert_eq!(outcome.missing_keywords, vec!["django".to_string()]);
        assert!(outcome.match_score > 0.0 && outcome.match_score < 100.0);
    }

    #[test]
    fn test_missing_ordered_by_job_weight() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze("python", "terraform terraform kubernetes ansible ansible ansible");

        assert_eq!(
            outcome.missing_keywords,
            vec!["ansible".to_string(), "terraform".to_string(), "kubernetes".to_string()]
        );
        assert_partition(&outcome);
    }

    #[test]
    fn test_javascript_and_js_stay_unmatched() {
        let engine = MatchingEngine::new();
        let outcome = engine.analyze("JS", "JavaScript");

        assert!(outcome.matched_keywords.is_empty());
        assert_eq!(outcome.missing_keywords, vec!["javascript".to_string()]);
        assert_eq!(outcome.match_score, 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let engine = MatchingEngine::new();

        for (resume, job) in [("", ""), ("python", ""), ("", "python"), ("  \n\t", "   ")] {
            let outcome = engine.analyze(resume, job);
            assert!((0.0..=100.0).contains(&outcome.match_score));
            assert_partition(&outcome);
        }

        let outcome = engine.analyze("python rust", "");
        assert_eq!(outcome.match_score, 0.0);
        assert_eq!(outcome.job_keyword_count, 0);
    }

    #[test]
    fn test_deterministic_output() {
        let engine = MatchingEngine::new();
        let first = serde_json::to_string(&engine.analyze(RESUME, JOB)).unwrap();
        let second = serde_json::to_string(&engine.analyze(RESUME, JOB)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_across_threads() {
        let engine = MatchingEngine::new();
        let expected = engine.analyze(RESUME, JOB);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| engine.analyze(RESUME, JOB))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = Config::default();
        config.engine.additional_stop_words = vec!["looking".to_string()];
        config.scoring.strong_match_threshold = 10.0;
        config.scoring.moderate_match_threshold = 5.0;

        let engine = MatchingEngine::from_config(&config.engine, &config.scoring, 10);
        let outcome = engine.analyze(RESUME, JOB);

        assert!(!outcome.missing_keywords.contains(&"looking".to_string()));
        assert_eq!(outcome.tier, MatchTier::Strong);
    }
}

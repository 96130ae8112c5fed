//! TF-IDF keyword extraction over the two-document {resume, job} corpus

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Documents in every corpus: the resume and the job description.
const CORPUS_SIZE: f64 = 2.0;

/// Short technical terms that stay keywords below the minimum length.
pub const PRESERVED_TERMS: &[&str] = &[
    "api", "sql", "html", "css", "js", "json", "xml", "http", "https",
    "rest", "graphql", "aws", "gcp", "azure", "docker", "kubernetes",
    "ci", "cd", "devops", "ml", "ai", "nlp", "cv", "ui", "ux",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub term: String,
    pub weight: f64,
}

/// One document's keywords, enumerated by descending weight.
///
/// Equal weights keep the order in which the terms first appeared in the
/// document, so enumeration is fully deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentKeywords {
    keywords: Vec<KeywordWeight>,
    index: HashMap<String, usize>,
}

impl DocumentKeywords {
    fn from_sorted(keywords: Vec<KeywordWeight>) -> Self {
        let index = keywords
            .iter()
            .enumerate()
            .map(|(position, keyword)| (keyword.term.clone(), position))
            .collect();
        Self { keywords, index }
    }

    pub fn get(&self, term: &str) -> Option<&KeywordWeight> {
        self.index.get(term).map(|&position| &self.keywords[position])
    }

    pub fn weight(&self, term: &str) -> Option<f64> {
        self.get(term).map(|keyword| keyword.weight)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordWeight> {
        self.keywords.iter()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|keyword| keyword.term.as_str())
    }

    pub fn total_weight(&self) -> f64 {
        self.keywords.iter().map(|keyword| keyword.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocumentKeywords {
    type Item = &'a KeywordWeight;
    type IntoIter = std::slice::Iter<'a, KeywordWeight>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

/// Term counts of one document, in first-occurrence order
struct TermCounts {
    terms: Vec<(String, usize)>,
    total_tokens: usize,
}

impl TermCounts {
    fn from_tokens(tokens: &[String]) -> Self {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut terms: Vec<(String, usize)> = Vec::new();

        for token in tokens {
            match positions.get(token.as_str()) {
                Some(&position) => terms[position].1 += 1,
                None => {
                    positions.insert(token.as_str(), terms.len());
                    terms.push((token.clone(), 1));
                }
            }
        }

        Self {
            terms,
            total_tokens: tokens.len(),
        }
    }

    fn vocabulary(&self) -> HashSet<&str> {
        self.terms.iter().map(|(term, _)| term.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_keyword_length: usize,
    max_keywords: usize,
    preserved_terms: HashSet<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(3, 50, PRESERVED_TERMS.iter().copied())
    }
}

impl KeywordExtractor {
    pub fn new<I, S>(min_keyword_length: usize, max_keywords: usize, preserved_terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            min_keyword_length,
            max_keywords,
            preserved_terms: preserved_terms
                .into_iter()
                .map(|term| term.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Smoothed inverse document frequency for a term found in `document_frequency` documents
    pub fn idf(document_frequency: usize) -> f64 {
        ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency as f64)).ln() + 1.0
    }

    /// Weight the resume and job token streams against each other.
    ///
    /// Returns `(resume_keywords, job_keywords)`.
    pub fn extract_pair(
        &self,
        resume_tokens: &[String],
        job_tokens: &[String],
    ) -> (DocumentKeywords, DocumentKeywords) {
        let resume_counts = TermCounts::from_tokens(resume_tokens);
        let job_counts = TermCounts::from_tokens(job_tokens);

        let resume_vocabulary = resume_counts.vocabulary();
        let job_vocabulary = job_counts.vocabulary();
        let document_frequency = |term: &str| {
            usize::from(resume_vocabulary.contains(term)) + usize::from(job_vocabulary.contains(term))
        };

        let resume = self.weigh(&resume_counts, &document_frequency);
        let job = self.weigh(&job_counts, &document_frequency);
        (resume, job)
    }

    fn weigh(&self, counts: &TermCounts, document_frequency: &dyn Fn(&str) -> usize) -> DocumentKeywords {
        if counts.total_tokens == 0 {
            return DocumentKeywords::default();
        }
        let total = counts.total_tokens as f64;

        let mut keywords: Vec<KeywordWeight> = counts
            .terms
            .iter()
            .filter(|(term, _)| self.is_candidate(term))
            .map(|(term, count)| KeywordWeight {
                term: term.clone(),
                weight: (*count as f64 / total) * Self::idf(document_frequency(term)),
            })
            .filter(|keyword| keyword.weight > 0.0)
            .collect();

        // Stable sort keeps first-occurrence order among equal weights
        keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        if self.max_keywords > 0 {
            keywords.truncate(self.max_keywords);
        }

        DocumentKeywords::from_sorted(keywords)
    }

    fn is_candidate(&self, term: &str) -> bool {
        if term.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        term.chars().count() >= self.min_keyword_length || self.preserved_terms.contains(term)
    }
}

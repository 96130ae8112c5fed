//! Text normalization into keyword candidate tokens

use regex::Regex;
use std::collections::HashSet;

/// Words that never indicate a skill.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
    "be", "have", "has", "had", "do", "does", "did", "will", "would",
    "should", "could", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "me", "him", "her", "us", "them", "my", "your", "his", "its",
    "our", "their", "what", "which", "who", "whom", "whose", "where",
    "when", "why", "how", "all", "each", "every", "both", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "now",
];

/// Lowercases, strips special characters and drops stop words.
///
/// The stop-word set is fixed once the normalizer is built; share one
/// instance rather than rebuilding it per document.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    special_chars: Regex,
    whitespace: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::with_additional_stop_words(std::iter::empty::<String>())
    }

    pub fn with_additional_stop_words<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words: HashSet<String> = STOP_WORDS.iter().map(|s| s.to_string()).collect();
        stop_words.extend(
            extra
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty()),
        );

        // Hyphens stay so compound terms like "ci-cd" survive as one token
        let special_chars = Regex::new(r"[^\w\s-]").expect("Invalid special character regex");
        let whitespace = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stop_words,
            special_chars,
            whitespace,
        }
    }

    /// Lowercase, replace special characters with spaces and collapse whitespace
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.special_chars.replace_all(&lowered, " ");
        self.whitespace.replace_all(&stripped, " ").trim().to_string()
    }

    /// Ordered token stream with duplicates retained and stop words removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .split(' ')
            .map(|token| token.trim_matches('-'))
            .filter(|token| !token.is_empty() && !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

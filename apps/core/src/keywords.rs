//! Keyword Analysis.
//!
//! Frequency-based keyword extraction over batches of chat text, with
//! stopword filtering. A boundary operation for counselor-facing analytics;
//! not part of the triage cascade.

use std::collections::{HashMap, HashSet};

use crate::models::KeywordCount;

/// English stopwords, tuned for conversational mental-health text.
const STOPWORDS_EN: &[&str] = &[
    "the", "and", "to", "of", "a", "in", "is", "it", "for", "my", "i", "me", "am", "with", "on",
    "that", "this", "but", "so", "just", "have", "not", "was", "be", "as", "at", "can", "do",
    "if", "or", "are", "about", "an", "by", "from", "how", "what", "when", "where", "who", "why",
    "will", "would", "there", "they", "their", "them", "he", "she", "his", "her", "you", "your",
    "we", "our", "us", "had", "has", "been", "were", "did", "does", "really", "very", "much",
    "more", "some", "any", "all", "one", "like", "get", "go", "know", "think", "feel", "want",
    "need", "help",
];

/// Default number of keywords returned.
const DEFAULT_TOP_N: usize = 10;

/// Tokens shorter than this carry too little signal to report.
const MIN_TOKEN_LENGTH: usize = 4;

/// Frequency-based keyword extractor with stopword filtering.
pub struct KeywordAnalyzer {
    stopwords: HashSet<&'static str>,
    min_token_length: usize,
    max_keywords: usize,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAnalyzer {
    /// Create a new analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(MIN_TOKEN_LENGTH, DEFAULT_TOP_N)
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(min_token_length: usize, max_keywords: usize) -> Self {
        Self {
            stopwords: STOPWORDS_EN.iter().copied().collect(),
            min_token_length,
            max_keywords,
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| {
                token.len() >= self.min_token_length
                    && !self.stopwords.contains(token)
                    && !token.chars().all(|c| c.is_numeric())
            })
            .map(|token| token.to_string())
            .collect()
    }

    /// Extracts the top-N most frequent non-stopword tokens across the texts.
    ///
    /// Ties are broken alphabetically so the output is deterministic.
    pub fn analyze<S: AsRef<str>>(&self, texts: &[S], top_n: Option<usize>) -> Vec<KeywordCount> {
        let max_results = top_n.unwrap_or(self.max_keywords);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for token in self.tokenize(text.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut keywords: Vec<KeywordCount> = counts
            .into_iter()
            .map(|(token, count)| KeywordCount { token, count })
            .collect();

        keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        keywords.truncate(max_results);
        keywords
    }
}

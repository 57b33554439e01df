use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::stemmer::stem;
use crate::stopwords::StopWords;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[-_]").expect("valid regex");
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Lowercase, turn dashes and underscores into spaces, drop everything but `[a-z0-9]` and
/// whitespace, then collapse and trim whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = SEPARATORS.replace_all(&lowered, " ");
    let stripped = DISALLOWED.replace_all(&spaced, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Adjacent pairs joined by a single space.
pub fn bigrams(words: &[String]) -> Vec<String> {
    words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])).collect()
}

/// Shared text pipeline for documents and queries, so both produce comparable terms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: Arc<StopWords>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl Tokenizer {
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self { stop_words }
    }

    /// Stemmed unigrams in text order, followed by their bigrams.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        let mut tokens: Vec<String> = normalized
            .split(' ')
            .filter(|word| !word.is_empty() && !self.stop_words.contains(word))
            .map(stem)
            .collect();
        let pairs = bigrams(&tokens);
        tokens.extend(pairs);
        tokens
    }
}

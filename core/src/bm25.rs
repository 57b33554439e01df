//! Okapi BM25 corpus statistics and per-term scoring.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// BM25 tuning.
///
/// - `k1`: term frequency saturation. Higher values let repeated terms keep adding weight.
/// - `b`: document length normalization, from 0.0 (none) to 1.0 (full).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.5, b: 0.75 }
    }
}

/// Corpus-wide statistics, grown one document at a time by [`Bm25Model::train`].
///
/// Invariants: `avg_doc_len == total_token_count / total_docs` whenever `total_docs > 0`,
/// and no document frequency exceeds `total_docs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bm25Model {
    pub(crate) params: Bm25Params,
    pub(crate) doc_freq: BTreeMap<String, usize>,
    pub(crate) doc_lengths: BTreeMap<String, usize>,
    pub(crate) total_docs: usize,
    pub(crate) total_token_count: usize,
    pub(crate) avg_doc_len: f64,
    pub(crate) vocabulary: BTreeSet<String>,
}

impl Bm25Model {
    pub fn new(params: Bm25Params) -> Self {
        Self { params, ..Default::default() }
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    pub fn doc_length(&self, doc_id: &str) -> Option<usize> {
        self.doc_lengths.get(doc_id).copied()
    }

    /// Every term ever trained, in lexicographic order. Never shrinks.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.iter().map(String::as_str)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Record one document's statistics. Call exactly once per ingested document.
    pub fn train(&mut self, doc_id: &str, tokens: &[String]) {
        self.total_docs += 1;
        self.doc_lengths.insert(doc_id.to_string(), tokens.len());
        self.total_token_count += tokens.len();
        self.recompute_avg();

        let unique: HashSet<&String> = tokens.iter().collect();
        for token in unique {
            self.vocabulary.insert(token.clone());
            *self.doc_freq.entry(token.clone()).or_insert(0) += 1;
        }
    }

    /// Retract a previously trained document. The vocabulary keeps its terms.
    pub fn forget(&mut self, doc_id: &str, tokens: &[String]) {
        self.total_docs = self.total_docs.saturating_sub(1);
        self.doc_lengths.remove(doc_id);
        self.total_token_count = self.total_token_count.saturating_sub(tokens.len());
        self.recompute_avg();

        let unique: HashSet<&String> = tokens.iter().collect();
        for token in unique {
            if let Some(df) = self.doc_freq.get_mut(token.as_str()) {
                *df -= 1;
                if *df == 0 {
                    self.doc_freq.remove(token.as_str());
                }
            }
        }
    }

    fn recompute_avg(&mut self) {
        self.avg_doc_len = if self.total_docs == 0 {
            0.0
        } else {
            self.total_token_count as f64 / self.total_docs as f64
        };
    }

    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`; positive even for terms found in every document.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.total_docs as f64;
        let df = self.doc_freq(term) as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// BM25 contribution of `term` to the document `doc_id` whose tokens are `doc_tokens`.
    pub fn score(&self, term: &str, doc_id: &str, doc_tokens: &[String]) -> f64 {
        let tf = doc_tokens.iter().filter(|t| t.as_str() == term).count();
        if tf == 0 {
            return 0.0;
        }
        let tf = tf as f64;
        let doc_len = self.doc_length(doc_id).unwrap_or(0) as f64;
        let Bm25Params { k1, b } = self.params;

        let numerator = tf * (k1 + 1.0);
        let denominator = tf + k1 * (1.0 - b + b * (doc_len / self.avg_doc_len));
        self.idf(term) * (numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn train_updates_statistics() {
        let mut model = Bm25Model::new(Bm25Params::default());
        model.train("a", &toks(&["x", "x", "y"]));
        model.train("b", &toks(&["y"]));
        assert_eq!(model.total_docs(), 2);
        assert_eq!(model.doc_freq("x"), 1);
        assert_eq!(model.doc_freq("y"), 2);
        assert_eq!(model.doc_length("a"), Some(3));
        assert!((model.avg_doc_len() - 2.0).abs() < 1e-12);
        assert_eq!(model.vocabulary().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn idf_stays_positive_for_ubiquitous_terms() {
        let mut model = Bm25Model::new(Bm25Params::default());
        model.train("only", &toks(&["x"]));
        let idf = model.idf("x");
        assert!(idf > 0.0);
        assert!((idf - (4.0f64 / 3.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn unseen_terms_use_zero_doc_freq() {
        let mut model = Bm25Model::new(Bm25Params::default());
        model.train("a", &toks(&["x"]));
        assert!((model.idf("nope") - (1.5f64 / 0.5 + 1.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn score_matches_formula() {
        let mut model = Bm25Model::new(Bm25Params { k1: 1.2, b: 0.5 });
        let a = toks(&["x", "x", "y", "z"]);
        let b = toks(&["y", "z"]);
        model.train("a", &a);
        model.train("b", &b);

        let idf = model.idf("x");
        let expected = idf * (2.0 * 2.2) / (2.0 + 1.2 * (0.5 + 0.5 * (4.0 / 3.0)));
        assert!((model.score("x", "a", &a) - expected).abs() < 1e-12);
        assert_eq!(model.score("x", "b", &b), 0.0);
    }

    #[test]
    fn higher_term_frequency_scores_higher() {
        let mut model = Bm25Model::new(Bm25Params::default());
        let a = toks(&["x", "x", "x", "w"]);
        let b = toks(&["x", "w", "w", "w"]);
        model.train("a", &a);
        model.train("b", &b);
        assert!(model.score("x", "a", &a) > model.score("x", "b", &b));
    }

    #[test]
    fn forget_reverses_train() {
        let mut model = Bm25Model::new(Bm25Params::default());
        model.train("a", &toks(&["x"]));
        let before = model.clone();
        model.train("b", &toks(&["x", "y", "y"]));
        model.forget("b", &toks(&["x", "y", "y"]));
        assert_eq!(model.total_docs(), before.total_docs());
        assert_eq!(model.doc_freq("x"), 1);
        assert_eq!(model.doc_freq("y"), 0);
        assert_eq!(model.avg_doc_len(), before.avg_doc_len());
        // vocabulary is append-only
        assert_eq!(model.vocabulary_size(), 2);
    }
}

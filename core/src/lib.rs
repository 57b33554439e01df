//! Embeddable full-text search: tokenization, an inverted index, BM25 ranking,
//! typo correction against the vocabulary and synonym-based query expansion.

use serde::{Deserialize, Serialize};

pub mod bm25;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod observer;
pub mod persist;
pub mod stemmer;
pub mod stopwords;
pub mod synonyms;
pub mod tokenizer;

pub use bm25::{Bm25Model, Bm25Params};
pub use engine::{Engine, EngineConfig, Ingested};
pub use error::{Result, SearchError};
pub use observer::{SearchEvent, SearchObserver, TracingObserver};
pub use persist::LoadOutcome;
pub use stopwords::StopWords;
pub use synonyms::SynonymTable;
pub use tokenizer::Tokenizer;

/// Position of a document in the engine's store. Stable for the lifetime of the engine.
pub type Slot = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Tokens of the title-boosted text, unigrams followed by bigrams.
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub body: String,
    pub score: f64,
}

impl SearchHit {
    fn new(doc: &Document, score: f64) -> Self {
        Self { id: doc.id.clone(), title: doc.title.clone(), body: doc.body.clone(), score }
    }
}

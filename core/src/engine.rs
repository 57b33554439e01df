use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::bm25::{Bm25Model, Bm25Params};
use crate::error::Result;
use crate::fuzzy::find_closest_term;
use crate::index::InvertedIndex;
use crate::observer::{SearchEvent, SearchObserver};
use crate::persist::{read_snapshot, write_snapshot, LoadOutcome, Snapshot};
use crate::stopwords::StopWords;
use crate::synonyms::SynonymTable;
use crate::tokenizer::Tokenizer;
use crate::{Document, SearchHit, Slot};

/// How often the title is repeated ahead of the body, tripling title term frequency.
const TITLE_REPEAT: usize = 3;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub params: Bm25Params,
    pub stop_words: Arc<StopWords>,
    pub synonyms: Arc<SynonymTable>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            params: Bm25Params::default(),
            stop_words: StopWords::english(),
            synonyms: SynonymTable::english(),
        }
    }
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
    Inserted(Slot),
    Replaced(Slot),
}

/// Document store, inverted index and BM25 statistics, grown together by ingestion.
///
/// Mutation happens only through `add_document`, `upsert_document` and `load`; `search` and
/// `save` only read. Hosts sharing an engine across threads should hold it behind a
/// readers-writer lock.
pub struct Engine {
    tokenizer: Tokenizer,
    synonyms: Arc<SynonymTable>,
    documents: Vec<Document>,
    index: InvertedIndex,
    model: Bm25Model,
    observer: Option<Arc<dyn SearchObserver>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.stop_words),
            synonyms: config.synonyms,
            documents: Vec::new(),
            index: InvertedIndex::new(),
            model: Bm25Model::new(config.params),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn params(&self) -> Bm25Params {
        self.model.params()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored documents in slot order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// First stored document with this id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.model.vocabulary_size()
    }

    fn boosted_tokens(&self, title: &str, body: &str) -> Vec<String> {
        let mut full_text = String::with_capacity((title.len() + 1) * TITLE_REPEAT + body.len());
        for _ in 0..TITLE_REPEAT {
            full_text.push_str(title);
            full_text.push(' ');
        }
        full_text.push_str(body);
        self.tokenizer.tokenize(&full_text)
    }

    /// Store a new document. Ids are not checked: re-adding an id keeps both records and
    /// both can be returned by `search`.
    pub fn add_document(&mut self, id: &str, title: &str, body: &str) -> Slot {
        let tokens = self.boosted_tokens(title, body);
        let slot = self.documents.len();
        self.model.train(id, &tokens);
        self.index.insert(slot, &tokens);
        tracing::debug!(id, slot, tokens = tokens.len(), "added document");
        self.documents.push(Document {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            tokens,
        });
        slot
    }

    /// Replace the first document with this id in place, or add it if absent.
    pub fn upsert_document(&mut self, id: &str, title: &str, body: &str) -> Ingested {
        let Some(slot) = self.documents.iter().position(|d| d.id == id) else {
            return Ingested::Inserted(self.add_document(id, title, body));
        };
        let tokens = self.boosted_tokens(title, body);
        let old = std::mem::replace(
            &mut self.documents[slot],
            Document {
                id: id.to_string(),
                title: title.to_string(),
                body: body.to_string(),
                tokens: tokens.clone(),
            },
        );
        self.model.forget(&old.id, &old.tokens);
        self.index.remove(slot, &old.tokens);
        self.model.train(id, &tokens);
        self.index.insert(slot, &tokens);
        tracing::debug!(id, slot, tokens = tokens.len(), "replaced document");
        Ingested::Replaced(slot)
    }

    fn notify(&self, event: SearchEvent<'_>) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    /// Tokens absent from the index are swapped for the closest live vocabulary term, if any.
    ///
    /// Terms retracted by an upsert stay in the vocabulary with no document frequency; they are
    /// never offered as corrections.
    fn correct(&self, token: String) -> String {
        if self.index.contains(&token) {
            return token;
        }
        let live = self.model.vocabulary().filter(|term| self.model.doc_freq(term) > 0);
        match find_closest_term(&token, live) {
            Some(closest) if closest != token => {
                self.notify(SearchEvent::CorrectionApplied { from: &token, to: closest });
                closest.to_string()
            }
            _ => token,
        }
    }

    /// Rank stored documents against a free-text query, best first.
    ///
    /// A query with no searchable terms yields an empty list. Equal scores keep ascending
    /// slot order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let corrected: Vec<String> =
            self.tokenizer.tokenize(query).into_iter().map(|t| self.correct(t)).collect();
        if corrected.is_empty() {
            self.notify(SearchEvent::EmptyQuery { query });
            return Vec::new();
        }

        let terms = self.synonyms.expand(&corrected);
        let distinct: HashSet<&String> = corrected.iter().collect();
        if terms.len() > distinct.len() {
            self.notify(SearchEvent::QueryExpanded { before: &corrected, after: &terms });
        }

        // Only documents sharing at least one term can score above zero.
        let candidates: BTreeSet<Slot> =
            terms.iter().flat_map(|t| self.index.postings(t)).copied().collect();

        let mut scored: Vec<(Slot, f64)> = candidates
            .into_iter()
            .map(|slot| {
                let doc = &self.documents[slot];
                let score: f64 =
                    terms.iter().map(|t| self.model.score(t, &doc.id, &doc.tokens)).sum();
                (slot, score)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .map(|(slot, score)| SearchHit::new(&self.documents[slot], score))
            .collect()
    }

    /// Write the full state as a JSON snapshot, replacing `path` atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let snapshot = Snapshot::capture(&self.documents, &self.index, &self.model);
        write_snapshot(path, &snapshot)?;
        tracing::info!(path = %path.display(), docs = self.documents.len(), "engine saved");
        Ok(())
    }

    /// Replace the full state with a snapshot. A missing file leaves the engine untouched; a
    /// malformed one fails without modifying anything.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadOutcome> {
        let path = path.as_ref();
        let Some(snapshot) = read_snapshot(path)? else {
            tracing::info!(path = %path.display(), "no saved index found");
            return Ok(LoadOutcome::Missing);
        };
        let (documents, index, model) = snapshot.into_parts();
        self.documents = documents;
        self.index = index;
        self.model = model;
        tracing::info!(path = %path.display(), docs = self.documents.len(), "engine loaded");
        Ok(LoadOutcome::Loaded)
    }
}

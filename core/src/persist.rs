//! Full-state JSON snapshots of an engine.
//!
//! Layout:
//! `{ documents: [{id, title, body, tokens}], index: [[token, [slot, ..]]], model: { k1, b,
//! docFreqs: [[token, count]], docLengths: [[docId, length]], totalDocs, totalDocLen,
//! avgDocLen, vocab: [token] } }`

use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::bm25::{Bm25Model, Bm25Params};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::{Document, Slot};

/// Result of a load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// No snapshot at the path; in-memory state was left as it was.
    Missing,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub documents: Vec<Document>,
    pub index: Vec<(String, Vec<Slot>)>,
    pub model: ModelSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModelSnapshot {
    pub k1: f64,
    pub b: f64,
    pub doc_freqs: Vec<(String, usize)>,
    pub doc_lengths: Vec<(String, usize)>,
    pub total_docs: usize,
    pub total_doc_len: usize,
    pub avg_doc_len: f64,
    pub vocab: Vec<String>,
}

impl Snapshot {
    pub fn capture(documents: &[Document], index: &InvertedIndex, model: &Bm25Model) -> Self {
        Snapshot {
            documents: documents.to_vec(),
            index: index.iter().map(|(term, slots)| (term.to_string(), slots.to_vec())).collect(),
            model: ModelSnapshot {
                k1: model.params.k1,
                b: model.params.b,
                doc_freqs: model.doc_freq.iter().map(|(t, c)| (t.clone(), *c)).collect(),
                doc_lengths: model.doc_lengths.iter().map(|(id, l)| (id.clone(), *l)).collect(),
                total_docs: model.total_docs,
                total_doc_len: model.total_token_count,
                avg_doc_len: model.avg_doc_len,
                vocab: model.vocabulary.iter().cloned().collect(),
            },
        }
    }

    /// Check cross-references so a bad snapshot is rejected before anything is replaced.
    pub fn validate(&self) -> Result<()> {
        let m = &self.model;
        if !m.k1.is_finite() || !m.b.is_finite() || !m.avg_doc_len.is_finite() {
            return Err(invalid("model parameters must be finite numbers"));
        }
        if let Some((term, slot)) = self
            .index
            .iter()
            .flat_map(|(term, slots)| slots.iter().map(move |s| (term, *s)))
            .find(|(_, slot)| *slot >= self.documents.len())
        {
            return Err(invalid(format!(
                "index entry {term:?} points at slot {slot}, but only {} documents exist",
                self.documents.len()
            )));
        }
        if let Some((term, count)) = m.doc_freqs.iter().find(|(_, c)| *c > m.total_docs) {
            return Err(invalid(format!(
                "document frequency {count} of {term:?} exceeds total documents {}",
                m.total_docs
            )));
        }
        Ok(())
    }

    pub fn into_parts(self) -> (Vec<Document>, InvertedIndex, Bm25Model) {
        let index = InvertedIndex { postings: self.index.into_iter().collect() };
        let m = self.model;
        let model = Bm25Model {
            params: Bm25Params { k1: m.k1, b: m.b },
            doc_freq: m.doc_freqs.into_iter().collect(),
            doc_lengths: m.doc_lengths.into_iter().collect(),
            total_docs: m.total_docs,
            total_token_count: m.total_doc_len,
            avg_doc_len: m.avg_doc_len,
            vocabulary: m.vocab.into_iter().collect(),
        };
        (self.documents, index, model)
    }
}

fn invalid(msg: impl Into<String>) -> SearchError {
    SearchError::InvalidSnapshot(msg.into())
}

/// Write the snapshot to a temporary sibling file, then rename it over `path`.
pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, snapshot).map_err(std::io::Error::from)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// `Ok(None)` when nothing exists at `path`.
pub(crate) fn read_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
    snapshot.validate()?;
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let tokens = vec!["apple".to_string()];
        let doc = Document { id: "d".into(), title: "Apple".into(), body: String::new(), tokens: tokens.clone() };
        let mut index = InvertedIndex::new();
        index.insert(0, &tokens);
        let mut model = Bm25Model::new(Bm25Params::default());
        model.train("d", &tokens);
        Snapshot::capture(&[doc], &index, &model)
    }

    #[test]
    fn uses_documented_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["index"][0][0], "apple");
        assert_eq!(value["index"][0][1][0], 0);
        assert_eq!(value["model"]["docFreqs"][0][1], 1);
        assert_eq!(value["model"]["docLengths"][0][0], "d");
        assert_eq!(value["model"]["totalDocs"], 1);
        assert_eq!(value["model"]["totalDocLen"], 1);
        assert_eq!(value["model"]["avgDocLen"], 1.0);
        assert_eq!(value["model"]["vocab"][0], "apple");
        assert_eq!(value["documents"][0]["body"], "");
    }

    #[test]
    fn rejects_dangling_slots() {
        let mut snap = sample();
        snap.index.push(("ghost".into(), vec![7]));
        assert!(matches!(snap.validate(), Err(SearchError::InvalidSnapshot(_))));
    }

    #[test]
    fn rejects_inflated_doc_freq() {
        let mut snap = sample();
        snap.model.doc_freqs[0].1 = 5;
        assert!(matches!(snap.validate(), Err(SearchError::InvalidSnapshot(_))));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let mut snap = sample();
        snap.model.k1 = f64::NAN;
        assert!(matches!(snap.validate(), Err(SearchError::InvalidSnapshot(_))));

        let mut snap = sample();
        snap.model.avg_doc_len = f64::INFINITY;
        assert!(matches!(snap.validate(), Err(SearchError::InvalidSnapshot(_))));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let got = read_snapshot(&dir.path().join("absent.json")).unwrap();
        assert!(got.is_none());
    }
}

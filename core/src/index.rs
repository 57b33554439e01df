use std::collections::{BTreeMap, HashSet};

use crate::Slot;

/// Term to the slots of the documents containing it, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedIndex {
    pub(crate) postings: BTreeMap<String, Vec<Slot>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `slot` to the entry of every distinct token, creating entries as needed.
    pub fn insert(&mut self, slot: Slot, tokens: &[String]) {
        let unique: HashSet<&String> = tokens.iter().collect();
        for token in unique {
            self.postings.entry(token.clone()).or_default().push(slot);
        }
    }

    /// Drop `slot` from the entries of `tokens`, removing entries left empty.
    pub fn remove(&mut self, slot: Slot, tokens: &[String]) {
        let unique: HashSet<&String> = tokens.iter().collect();
        for token in unique {
            if let Some(slots) = self.postings.get_mut(token.as_str()) {
                slots.retain(|s| *s != slot);
                if slots.is_empty() {
                    self.postings.remove(token.as_str());
                }
            }
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn postings(&self, term: &str) -> &[Slot] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Slot])> + '_ {
        self.postings.iter().map(|(term, slots)| (term.as_str(), slots.as_slice()))
    }
}

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures and oracles so tests don't re-derive them.

#![doc(hidden)]

use crate::index::{IndexReader, MemoryIndex};
use crate::query::PhraseQuery;
use crate::scoring::{ClassicSimilarity, Similarity};
use crate::types::{DocId, Term, TermPositions};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;

/// One document per text, all in `body`.
pub fn body_index(texts: &[&str]) -> MemoryIndex {
    MemoryIndex::from_texts("body", texts)
}

/// Documents made of `(title, body)` pairs.
pub fn titled_index(docs: &[(&str, &str)]) -> MemoryIndex {
    let mut builder = MemoryIndex::builder();
    for (title, body) in docs {
        builder.add_document([("title", *title), ("body", *body)]);
    }
    builder.build()
}

/// Consecutive phrase over `body`.
pub fn body_phrase(words: &[&str]) -> PhraseQuery {
    PhraseQuery::from_words(words, None, Some("body")).expect("consecutive phrase is valid")
}

/// Count aligned occurrences of `words` in `tokens` by trying every start.
///
/// Reference for the exact matcher. `offsets[i]` is where `words[i]` sits in
/// the pattern; several words at one offset are alternates and must be
/// distinct. A token then matches at most one alternate per offset, so every
/// aligned start is exactly one confirmed hypothesis.
pub fn naive_exact_freq(tokens: &[&str], words: &[&str], offsets: &[u32]) -> u32 {
    let Some(&min_offset) = offsets.iter().min() else {
        return 0;
    };
    let mut slots: std::collections::BTreeMap<u32, Vec<&str>> = Default::default();
    for (word, &offset) in words.iter().zip(offsets) {
        let alternates = slots.entry(offset).or_default();
        debug_assert!(!alternates.contains(word), "duplicate alternate {word:?} at {offset}");
        alternates.push(*word);
    }

    let mut freq = 0;
    for start in -(min_offset as i64)..tokens.len() as i64 {
        let aligned = slots.iter().all(|(&offset, alternates)| {
            let at = start + offset as i64;
            at >= 0
                && (at as usize) < tokens.len()
                && alternates.contains(&tokens[at as usize])
        });
        if aligned {
            freq += 1;
        }
    }
    freq
}

/// Error raised by [`FailingReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFailure(pub &'static str);

impl fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage failure in {}", self.0)
    }
}

impl std::error::Error for StorageFailure {}

/// A reader that answers structural questions but fails every postings read.
///
/// Used to check that provider errors reach the caller unchanged.
pub struct FailingReader {
    pub fields: BTreeSet<String>,
}

impl Default for FailingReader {
    fn default() -> Self {
        Self {
            fields: ["body".to_string()].into_iter().collect(),
        }
    }
}

impl IndexReader for FailingReader {
    type Error = StorageFailure;

    fn has_term(&self, _term: &Term) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn term_docs(&self, _term: &Term) -> Result<Vec<DocId>, Self::Error> {
        Err(StorageFailure("term_docs"))
    }

    fn term_positions(&self, _term: &Term) -> Result<TermPositions, Self::Error> {
        Err(StorageFailure("term_positions"))
    }

    fn doc_freq(&self, _term: &Term) -> Result<usize, Self::Error> {
        Ok(1)
    }

    fn num_docs(&self) -> usize {
        1
    }

    fn norm(&self, _doc: DocId, _field: &str) -> Result<f32, Self::Error> {
        Err(StorageFailure("norm"))
    }

    fn field_names(&self, _indexed_only: bool) -> Result<BTreeSet<String>, Self::Error> {
        Ok(self.fields.clone())
    }

    fn similarity(&self) -> &dyn Similarity {
        &ClassicSimilarity
    }
}

/// A [`MemoryIndex`] that counts postings reads.
///
/// Lets tests check when the engine goes back to the index for postings.
pub struct CountingReader {
    inner: MemoryIndex,
    term_docs: Cell<usize>,
    term_positions: Cell<usize>,
}

impl CountingReader {
    pub fn new(inner: MemoryIndex) -> Self {
        Self {
            inner,
            term_docs: Cell::new(0),
            term_positions: Cell::new(0),
        }
    }

    /// `(term_docs, term_positions)` calls so far.
    pub fn fetches(&self) -> (usize, usize) {
        (self.term_docs.get(), self.term_positions.get())
    }
}

impl IndexReader for CountingReader {
    type Error = Infallible;

    fn has_term(&self, term: &Term) -> Result<bool, Self::Error> {
        self.inner.has_term(term)
    }

    fn term_docs(&self, term: &Term) -> Result<Vec<DocId>, Self::Error> {
        self.term_docs.set(self.term_docs.get() + 1);
        self.inner.term_docs(term)
    }

    fn term_positions(&self, term: &Term) -> Result<TermPositions, Self::Error> {
        self.term_positions.set(self.term_positions.get() + 1);
        self.inner.term_positions(term)
    }

    fn doc_freq(&self, term: &Term) -> Result<usize, Self::Error> {
        self.inner.doc_freq(term)
    }

    fn num_docs(&self) -> usize {
        self.inner.num_docs()
    }

    fn norm(&self, doc: DocId, field: &str) -> Result<f32, Self::Error> {
        self.inner.norm(doc, field)
    }

    fn field_names(&self, indexed_only: bool) -> Result<BTreeSet<String>, Self::Error> {
        self.inner.field_names(indexed_only)
    }

    fn similarity(&self) -> &dyn Similarity {
        self.inner.similarity()
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory positional inverted index.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSITIONS_SORTED**: every per-document position list is strictly ascending
//! 2. **DOCS_SORTED**: `term_docs` is ascending (it is the key order of a `BTreeMap`)
//! 3. **NON_EMPTY**: every stored term has at least one document
//!
//! Positions are token ordinals within a field, not byte offsets. A field that
//! appears twice in one document continues numbering where the first occurrence
//! stopped, so its values read as one run of text.

use super::IndexReader;
use crate::contracts::check_positions_sorted;
use crate::scoring::{ClassicSimilarity, Similarity};
use crate::types::{DocId, Term, TermPositions};
use crate::utils::fold_term;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::convert::Infallible;
use std::fmt;

/// Word boundary detection: checks if character is a word separator.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Tokenize text into normalized words with their token positions.
///
/// Splits on non-alphanumeric characters and normalizes each word (lowercase,
/// diacritics stripped). Position `n` is the `n`-th emitted word.
pub fn tokenize(text: &str) -> Vec<(String, u32)> {
    let mut tokens = Vec::new();
    let mut position = 0u32;

    for word in text.split(is_word_boundary) {
        if word.is_empty() {
            continue;
        }
        let normalized = fold_term(word);
        if normalized.is_empty() {
            continue;
        }
        tokens.push((normalized, position));
        position += 1;
    }

    tokens
}

/// Everything indexed for one field.
#[derive(Debug, Default, Clone)]
struct FieldIndex {
    terms: HashMap<String, TermPositions>,
    norms: HashMap<DocId, u8>,
}

/// Accumulates documents, then freezes into a [`MemoryIndex`].
pub struct MemoryIndexBuilder {
    fields: BTreeMap<String, FieldIndex>,
    next_doc: u32,
    similarity: Box<dyn Similarity>,
}

impl Default for MemoryIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIndexBuilder {
    pub fn new() -> Self {
        Self::with_similarity(Box::new(ClassicSimilarity))
    }

    /// Use a custom relevance model. It computes the stored norms and is
    /// handed to every query that reads the finished index.
    pub fn with_similarity(similarity: Box<dyn Similarity>) -> Self {
        Self {
            fields: BTreeMap::new(),
            next_doc: 0,
            similarity,
        }
    }

    /// Add a document made of `(field, text)` pairs and return its id.
    ///
    /// Ids are assigned densely in insertion order starting at 0.
    pub fn add_document<I, F, T>(&mut self, fields: I) -> DocId
    where
        I: IntoIterator<Item = (F, T)>,
        F: AsRef<str>,
        T: AsRef<str>,
    {
        let doc = DocId(self.next_doc);
        self.next_doc += 1;

        let mut lengths: BTreeMap<String, u32> = BTreeMap::new();

        for (field, text) in fields {
            let field = field.as_ref();
            let base = lengths.get(field).copied().unwrap_or(0);
            let entry = self.fields.entry(field.to_string()).or_default();
            let tokens = tokenize(text.as_ref());
            let count = tokens.len() as u32;

            for (word, position) in tokens {
                entry
                    .terms
                    .entry(word)
                    .or_default()
                    .entry(doc)
                    .or_default()
                    .push(base + position);
            }

            lengths.insert(field.to_string(), base + count);
        }

        for (field, length) in lengths {
            let norm = self.similarity.length_norm(&field, length as usize);
            let byte = self.similarity.encode_norm(norm);
            if let Some(entry) = self.fields.get_mut(&field) {
                entry.norms.insert(doc, byte);
            }
        }

        doc
    }

    pub fn build(self) -> MemoryIndex {
        for field in self.fields.values() {
            for positions in field.terms.values() {
                for list in positions.values() {
                    check_positions_sorted(list);
                }
            }
        }

        tracing::debug!(
            docs = self.next_doc,
            fields = self.fields.len(),
            "built memory index"
        );

        MemoryIndex {
            fields: self.fields,
            num_docs: self.next_doc,
            similarity: self.similarity,
        }
    }
}

/// A frozen, fully in-memory index.
pub struct MemoryIndex {
    fields: BTreeMap<String, FieldIndex>,
    num_docs: u32,
    similarity: Box<dyn Similarity>,
}

impl fmt::Debug for MemoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryIndex")
            .field("num_docs", &self.num_docs)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MemoryIndex {
    pub fn builder() -> MemoryIndexBuilder {
        MemoryIndexBuilder::new()
    }

    /// Convenience: one document per text, all in the same field.
    pub fn from_texts<S: AsRef<str>>(field: &str, texts: &[S]) -> Self {
        let mut builder = MemoryIndexBuilder::new();
        for text in texts {
            builder.add_document([(field, text.as_ref())]);
        }
        builder.build()
    }

    /// Number of distinct terms in `field`.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, |f| f.terms.len())
    }

    fn postings(&self, term: &Term) -> Option<&TermPositions> {
        let field = term.field()?;
        self.fields.get(field)?.terms.get(term.text())
    }
}

impl IndexReader for MemoryIndex {
    type Error = Infallible;

    fn has_term(&self, term: &Term) -> Result<bool, Self::Error> {
        Ok(self.postings(term).is_some())
    }

    fn term_docs(&self, term: &Term) -> Result<Vec<DocId>, Self::Error> {
        Ok(self
            .postings(term)
            .map(|p| p.keys().copied().collect())
            .unwrap_or_default())
    }

    fn term_positions(&self, term: &Term) -> Result<TermPositions, Self::Error> {
        Ok(self.postings(term).cloned().unwrap_or_default())
    }

    fn doc_freq(&self, term: &Term) -> Result<usize, Self::Error> {
        Ok(self.postings(term).map_or(0, BTreeMap::len))
    }

    fn num_docs(&self) -> usize {
        self.num_docs as usize
    }

    fn norm(&self, doc: DocId, field: &str) -> Result<f32, Self::Error> {
        let byte = self
            .fields
            .get(field)
            .and_then(|f| f.norms.get(&doc))
            .copied();
        // A document without the field never matches in it; 1.0 keeps the
        // factor neutral for callers that ask anyway.
        Ok(byte.map_or(1.0, |b| self.similarity.decode_norm(b)))
    }

    fn field_names(&self, _indexed_only: bool) -> Result<BTreeSet<String>, Self::Error> {
        // Every field in a memory index is indexed.
        Ok(self.fields.keys().cloned().collect())
    }

    fn similarity(&self) -> &dyn Similarity {
        self.similarity.as_ref()
    }
}

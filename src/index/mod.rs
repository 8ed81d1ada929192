// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index as seen by a query.
//!
//! Queries never touch storage directly. They ask an [`IndexReader`] a small
//! set of questions: does this term exist, which documents hold it, where in
//! each document, how long is the field. Any storage layer that can answer
//! those questions can be searched.
//!
//! [`MemoryIndex`] is the in-process implementation used by the CLI, the tests
//! and the benchmarks.

mod memory;

pub use memory::{tokenize, MemoryIndex, MemoryIndexBuilder};

use crate::scoring::Similarity;
use crate::types::{DocId, Term, TermPositions};
use std::collections::BTreeSet;

/// Read access to a positional inverted index.
///
/// Errors are the reader's own and pass through every query operation
/// unchanged. Queries never retry.
///
/// A term whose field is `None` is never present in a concrete field, so
/// readers may answer "absent" for it.
pub trait IndexReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether any document contains `term`.
    fn has_term(&self, term: &Term) -> Result<bool, Self::Error>;

    /// Documents containing `term`, ascending, without duplicates.
    fn term_docs(&self, term: &Term) -> Result<Vec<DocId>, Self::Error>;

    /// Per-document positions of `term`, each list ascending.
    fn term_positions(&self, term: &Term) -> Result<TermPositions, Self::Error>;

    /// Number of documents containing `term`.
    fn doc_freq(&self, term: &Term) -> Result<usize, Self::Error>;

    /// Number of documents in the index.
    fn num_docs(&self) -> usize;

    /// Decoded length norm of `field` in `doc`.
    fn norm(&self, doc: DocId, field: &str) -> Result<f32, Self::Error>;

    /// Field names known to the index. With `indexed_only`, only fields that
    /// can be searched.
    fn field_names(&self, indexed_only: bool) -> Result<BTreeSet<String>, Self::Error>;

    /// The relevance model scores should be computed with.
    fn similarity(&self) -> &dyn Similarity;
}

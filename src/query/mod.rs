// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query classes and their shared lifecycle.
//!
//! Every query goes through the same stages:
//!
//! ```text
//! rewrite(reader) ──▶ optimize(reader) ──▶ execute(reader, filter) ──▶ score(doc, reader)
//!  field binding       index-aware          weights + candidates       per-document
//!                      simplification
//! ```
//!
//! `rewrite` and `optimize` consume the query and may hand back a different
//! class: a phrase with one surviving term becomes a [`TermQuery`], a phrase
//! whose terms all share one offset becomes a [`MultiTermQuery`], an
//! unsatisfiable one becomes [`Query::Empty`]. [`Query`] is the closed set of
//! everything those stages can produce.

mod disjunction;
mod multi_term;
pub mod phrase;
mod term;

pub use disjunction::DisjunctionQuery;
pub use multi_term::MultiTermQuery;
pub use phrase::PhraseQuery;
pub use term::TermQuery;

use crate::index::IndexReader;
use crate::types::{DocFilter, DocId, MatchedDocs};
use std::fmt;

static NO_DOCS: MatchedDocs = MatchedDocs::new();

/// Any query the engine can evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Phrase(PhraseQuery),
    Term(TermQuery),
    MultiTerm(MultiTermQuery),
    Disjunction(DisjunctionQuery),
    /// Matches nothing. Produced when a query can never be satisfied.
    Empty,
}

impl Query {
    pub fn boost(&self) -> f32 {
        match self {
            Query::Phrase(q) => q.boost(),
            Query::Term(q) => q.boost(),
            Query::MultiTerm(q) => q.boost(),
            Query::Disjunction(q) => q.boost(),
            Query::Empty => 1.0,
        }
    }

    /// Set the boost. Has no effect on [`Query::Empty`].
    pub fn set_boost(&mut self, boost: f32) {
        match self {
            Query::Phrase(q) => q.set_boost(boost),
            Query::Term(q) => q.set_boost(boost),
            Query::MultiTerm(q) => q.set_boost(boost),
            Query::Disjunction(q) => q.set_boost(boost),
            Query::Empty => {}
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, Query::Empty)
    }

    /// Bind field-less queries to the index's fields.
    pub fn rewrite<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        match self {
            Query::Phrase(q) => q.rewrite(reader),
            Query::Term(q) => q.rewrite(reader),
            Query::MultiTerm(q) => q.rewrite(reader),
            Query::Disjunction(q) => q.rewrite(reader),
            Query::Empty => Ok(Query::Empty),
        }
    }

    /// Simplify against a concrete index. Never adds terms.
    pub fn optimize<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        match self {
            Query::Phrase(q) => q.optimize(reader),
            Query::Term(q) => q.optimize(reader),
            Query::MultiTerm(q) => q.optimize(reader),
            Query::Disjunction(q) => q.optimize(reader),
            Query::Empty => Ok(Query::Empty),
        }
    }

    /// Compute weights and candidate documents. Replaces any earlier execution.
    pub fn execute<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        execute_top_level(self, reader, filter)
    }

    /// Candidates from the last `execute`, ascending.
    pub fn matched_docs(&self) -> &MatchedDocs {
        match self {
            Query::Phrase(q) => q.matched_docs(),
            Query::Term(q) => q.matched_docs(),
            Query::MultiTerm(q) => q.matched_docs(),
            Query::Disjunction(q) => q.matched_docs(),
            Query::Empty => &NO_DOCS,
        }
    }

    /// Relevance of `doc`. Zero for documents that are not candidates.
    pub fn score<R: IndexReader>(&self, doc: DocId, reader: &R) -> Result<f32, R::Error> {
        match self {
            Query::Phrase(q) => q.score(doc, reader),
            Query::Term(q) => q.score(doc, reader),
            Query::MultiTerm(q) => q.score(doc, reader),
            Query::Disjunction(q) => q.score(doc, reader),
            Query::Empty => Ok(0.0),
        }
    }
}

impl From<PhraseQuery> for Query {
    fn from(q: PhraseQuery) -> Self {
        Query::Phrase(q)
    }
}

impl From<TermQuery> for Query {
    fn from(q: TermQuery) -> Self {
        Query::Term(q)
    }
}

impl From<MultiTermQuery> for Query {
    fn from(q: MultiTermQuery) -> Self {
        Query::MultiTerm(q)
    }
}

impl From<DisjunctionQuery> for Query {
    fn from(q: DisjunctionQuery) -> Self {
        Query::Disjunction(q)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Phrase(q) => fmt::Display::fmt(q, f),
            Query::Term(q) => fmt::Display::fmt(q, f),
            Query::MultiTerm(q) => fmt::Display::fmt(q, f),
            Query::Disjunction(q) => fmt::Display::fmt(q, f),
            Query::Empty => f.write_str("<EmptyQuery>"),
        }
    }
}

// =============================================================================
// EXECUTION PROTOCOL
// =============================================================================

/// The weight and candidate steps every query class implements.
///
/// A top-level query runs all four in order (see [`execute_top_level`]). A
/// disjunction drives its clauses through the same steps itself, so the
/// clauses' weights are normalized against the whole disjunction rather than
/// against themselves.
pub(crate) trait Evaluate {
    fn create_weight<R: IndexReader>(&mut self, reader: &R) -> Result<(), R::Error>;

    fn sum_of_squared_weights(&mut self) -> f32;

    fn normalize_weight(&mut self, query_norm: f32);

    /// Fetch postings and build the candidate set, discarding the previous one.
    fn collect<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error>;
}

pub(crate) fn execute_top_level<Q: Evaluate, R: IndexReader>(
    query: &mut Q,
    reader: &R,
    filter: Option<&DocFilter>,
) -> Result<(), R::Error> {
    query.create_weight(reader)?;
    let sum = query.sum_of_squared_weights();
    let query_norm = reader.similarity().query_norm(sum);
    query.normalize_weight(query_norm);
    query.collect(reader, filter)
}

impl Evaluate for Query {
    fn create_weight<R: IndexReader>(&mut self, reader: &R) -> Result<(), R::Error> {
        match self {
            Query::Phrase(q) => q.create_weight(reader),
            Query::Term(q) => q.create_weight(reader),
            Query::MultiTerm(q) => q.create_weight(reader),
            Query::Disjunction(q) => q.create_weight(reader),
            Query::Empty => Ok(()),
        }
    }

    fn sum_of_squared_weights(&mut self) -> f32 {
        match self {
            Query::Phrase(q) => q.sum_of_squared_weights(),
            Query::Term(q) => q.sum_of_squared_weights(),
            Query::MultiTerm(q) => q.sum_of_squared_weights(),
            Query::Disjunction(q) => q.sum_of_squared_weights(),
            Query::Empty => 0.0,
        }
    }

    fn normalize_weight(&mut self, query_norm: f32) {
        match self {
            Query::Phrase(q) => q.normalize_weight(query_norm),
            Query::Term(q) => q.normalize_weight(query_norm),
            Query::MultiTerm(q) => q.normalize_weight(query_norm),
            Query::Disjunction(q) => q.normalize_weight(query_norm),
            Query::Empty => {}
        }
    }

    fn collect<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        match self {
            Query::Phrase(q) => q.collect(reader, filter),
            Query::Term(q) => q.collect(reader, filter),
            Query::MultiTerm(q) => q.collect(reader, filter),
            Query::Disjunction(q) => q.collect(reader, filter),
            Query::Empty => Ok(()),
        }
    }
}

/// Write the `^boost` suffix, rounded to four decimals, when boost is not 1.
pub(crate) fn write_boost(f: &mut fmt::Formatter<'_>, boost: f32) -> fmt::Result {
    if boost != 1.0 {
        let rounded = (f64::from(boost) * 10_000.0).round() / 10_000.0;
        write!(f, "^{}", rounded)?;
    }
    Ok(())
}

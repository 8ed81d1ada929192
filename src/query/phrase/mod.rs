// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phrase queries: ordered terms, optional slop, optional alternates.
//!
//! A phrase is a pattern of `(term, offset)` pairs. Offsets are positions
//! inside the pattern, so `"quick brown fox"` is `quick@0 brown@1 fox@2`.
//! Several terms may share an offset; they are alternates and any one of them
//! fills that slot (`run@0 ran@0 fast@1` matches both "run fast" and "ran fast").
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ candidates   │──▶│ exact (slop 0)│──▶│   tf(freq)   │──▶│    score     │
//! │ ∩ per offset │   │ sloppy (>0)   │   │ × weight     │   │ × norm×boost │
//! └──────────────┘   └───────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! `execute` builds the candidate set and caches every term's positions once.
//! `score` then runs the matcher per document from that cache, never touching
//! the reader's postings again.
//!
//! # Invariants
//!
//! - `terms.len() == offsets.len()`, matched index-for-index by insertion order
//! - all terms share one field (possibly none, for a wildcard phrase)
//! - alternates only exist while slop is 0

mod candidates;
mod exact;
mod sloppy;

pub use exact::exact_phrase_freq;
pub use sloppy::{min_deviation, sloppy_phrase_freq};

use super::{execute_top_level, write_boost, DisjunctionQuery, Evaluate, MultiTermQuery, Query, TermQuery};
use crate::contracts::{check_single_field, check_terms_offsets_aligned};
use crate::error::QueryError;
use crate::index::IndexReader;
use crate::scoring::{Similarity, Weight};
use crate::types::{DocFilter, DocId, MatchedDocs, PositionCache, Term};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone)]
pub struct PhraseQuery {
    terms: Vec<Term>,
    offsets: Vec<u32>,
    slop: u32,
    boost: f32,
    // Execution-scoped state, replaced wholesale by every `collect`.
    weight: Option<Weight>,
    positions: PositionCache,
    candidates: MatchedDocs,
}

impl Default for PhraseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PhraseQuery {
    /// Two phrases are equal when they describe the same pattern; caches are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
            && self.offsets == other.offsets
            && self.slop == other.slop
            && self.boost == other.boost
    }
}

impl PhraseQuery {
    /// An empty phrase. Rewrites and optimizes to [`Query::Empty`].
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            offsets: Vec::new(),
            slop: 0,
            boost: 1.0,
            weight: None,
            positions: PositionCache::new(),
            candidates: MatchedDocs::new(),
        }
    }

    /// Build a phrase from words, optional explicit offsets, and an optional field.
    ///
    /// Without offsets the words are consecutive. Without a field the phrase is
    /// a wildcard that `rewrite` expands across the index's fields.
    pub fn from_words<S: AsRef<str>>(
        words: &[S],
        offsets: Option<&[u32]>,
        field: Option<&str>,
    ) -> Result<Self, QueryError> {
        if let Some(offsets) = offsets {
            if offsets.len() != words.len() {
                return Err(QueryError::MismatchedOffsets {
                    words: words.len(),
                    offsets: offsets.len(),
                });
            }
        }

        let mut phrase = Self::new();
        for (i, word) in words.iter().enumerate() {
            let term = match field {
                Some(field) => Term::new(field, word.as_ref()),
                None => Term::unbound(word.as_ref()),
            };
            phrase.add_term(term, offsets.map(|o| o[i]))?;
        }
        Ok(phrase)
    }

    /// Append a term. Without an explicit offset it lands one past the current
    /// maximum offset (0 for the first term).
    pub fn add_term(&mut self, term: Term, offset: Option<u32>) -> Result<(), QueryError> {
        if let Some(first) = self.terms.first() {
            if first.field() != term.field() {
                return Err(QueryError::FieldConflict {
                    expected: first.field().map(str::to_string),
                    found: term.field().map(str::to_string),
                });
            }
        }

        let offset = match offset {
            Some(offset) => offset,
            None => self.next_offset()?,
        };
        if self.slop > 0 && self.offsets.contains(&offset) {
            return Err(QueryError::AlternatesWithSlop {
                offset,
                slop: self.slop,
            });
        }

        self.terms.push(term);
        self.offsets.push(offset);
        check_terms_offsets_aligned(&self.terms, &self.offsets);
        Ok(())
    }

    fn next_offset(&self) -> Result<u32, QueryError> {
        match self.offsets.iter().max() {
            None => Ok(0),
            Some(&last) => last
                .checked_add(1)
                .ok_or(QueryError::OffsetOverflow { last }),
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The field every term is bound to, or `None` for a wildcard phrase.
    pub fn field(&self) -> Option<&str> {
        self.terms.first().and_then(Term::field)
    }

    pub fn slop(&self) -> u32 {
        self.slop
    }

    /// Set the edit-distance budget. Fails if the phrase has alternates and
    /// `slop > 0`.
    pub fn set_slop(&mut self, slop: u32) -> Result<(), QueryError> {
        if slop > 0 {
            if let Some(offset) = self.first_shared_offset() {
                return Err(QueryError::AlternatesWithSlop { offset, slop });
            }
        }
        self.slop = slop;
        Ok(())
    }

    pub fn with_slop(mut self, slop: u32) -> Result<Self, QueryError> {
        self.set_slop(slop)?;
        Ok(self)
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Whether two or more terms share an offset.
    pub fn has_alternates(&self) -> bool {
        self.first_shared_offset().is_some()
    }

    fn first_shared_offset(&self) -> Option<u32> {
        let mut seen = HashSet::with_capacity(self.offsets.len());
        self.offsets.iter().copied().find(|offset| !seen.insert(*offset))
    }

    /// Term indices grouped by offset, ascending by offset.
    pub(crate) fn offset_groups(&self) -> BTreeMap<u32, Vec<usize>> {
        let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (i, &offset) in self.offsets.iter().enumerate() {
            groups.entry(offset).or_default().push(i);
        }
        groups
    }

    /// Same slop and boost, no terms.
    fn empty_like(&self) -> Self {
        let mut phrase = Self::new();
        phrase.slop = self.slop;
        phrase.boost = self.boost;
        phrase
    }

    // =========================================================================
    // REWRITE / OPTIMIZE
    // =========================================================================

    /// Bind a wildcard phrase to every indexed field.
    ///
    /// The result is a disjunction of one field-qualified copy per field, each
    /// keeping slop and boost; the disjunction carries the boost as well.
    /// Field-bound phrases come back unchanged.
    pub fn rewrite<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        if self.terms.is_empty() {
            return Ok(Query::Empty);
        }
        if self.field().is_some() {
            return Ok(Query::Phrase(self));
        }

        let fields = reader.field_names(true)?;
        tracing::debug!(phrase = %self, fields = fields.len(), "expanding wildcard phrase");

        let mut disjunction = DisjunctionQuery::new().with_boost(self.boost);
        for field in &fields {
            let mut copy = self.empty_like();
            for (term, &offset) in self.terms.iter().zip(&self.offsets) {
                copy.terms.push(term.with_field(field));
                copy.offsets.push(offset);
            }
            disjunction.push(Query::Phrase(copy));
        }
        Ok(Query::Disjunction(disjunction))
    }

    /// Simplify against `reader`.
    ///
    /// - no terms, or a term that can never match: [`Query::Empty`]
    /// - one term: [`TermQuery`]
    /// - every term at one offset: [`MultiTermQuery`], itself optimized
    /// - alternates: absent alternates pruned, phrase kept if every slot survives
    pub fn optimize<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        if self.terms.is_empty() {
            return Ok(Query::Empty);
        }

        let groups = self.offset_groups();

        if groups.len() == self.terms.len() {
            for term in &self.terms {
                if !reader.has_term(term)? {
                    tracing::debug!(phrase = %self, term = %term, "phrase term absent from index");
                    return Ok(Query::Empty);
                }
            }
            return Ok(self.into_simplest());
        }

        if groups.len() == 1 {
            tracing::debug!(phrase = %self, "all terms share one offset, matching any of them");
            let multi = MultiTermQuery::new(self.terms).with_boost(self.boost);
            return multi.optimize(reader);
        }

        let mut present = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            present.push(reader.has_term(term)?);
        }
        for (offset, indices) in &groups {
            if !indices.iter().any(|&i| present[i]) {
                tracing::debug!(phrase = %self, offset, "no alternate present for slot");
                return Ok(Query::Empty);
            }
        }

        let mut pruned = self.empty_like();
        for ((term, offset), keep) in self.terms.into_iter().zip(self.offsets).zip(present) {
            if keep {
                pruned.terms.push(term);
                pruned.offsets.push(offset);
            }
        }
        Ok(pruned.into_simplest())
    }

    /// Collapse the degenerate sizes into their simpler query classes.
    fn into_simplest(mut self) -> Query {
        match self.terms.len() {
            0 => Query::Empty,
            1 => {
                let term = self.terms.swap_remove(0);
                Query::Term(TermQuery::new(term).with_boost(self.boost))
            }
            _ => Query::Phrase(self),
        }
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Compute the weight, fetch every term's positions and build the
    /// candidate set. Anything cached by an earlier execution is discarded.
    pub fn execute<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        execute_top_level(self, reader, filter)
    }

    /// Documents holding at least one term of every slot, ascending.
    ///
    /// Presence here does not mean the phrase occurs: score may still be zero.
    pub fn matched_docs(&self) -> &MatchedDocs {
        &self.candidates
    }

    /// Match frequency of the phrase in `doc`, from cached positions.
    ///
    /// Exact matching counts aligned occurrences. Sloppy matching sums
    /// `similarity.sloppy_freq(distance)` over every occurrence within slop.
    pub fn phrase_freq(&self, doc: DocId, similarity: &dyn Similarity) -> f32 {
        if self.slop == 0 {
            exact_phrase_freq(&self.terms, &self.offsets, &self.positions, doc) as f32
        } else {
            sloppy_phrase_freq(
                &self.terms,
                &self.offsets,
                &self.positions,
                doc,
                self.slop,
                similarity,
            )
        }
    }

    /// `tf(freq) * weight * norm(doc, field) * boost`, or 0 if `doc` is not a
    /// candidate or the phrase never occurs in it.
    pub fn score<R: IndexReader>(&self, doc: DocId, reader: &R) -> Result<f32, R::Error> {
        if !self.candidates.contains(&doc) {
            return Ok(0.0);
        }

        let similarity = reader.similarity();
        let freq = self.phrase_freq(doc, similarity);
        if freq == 0.0 {
            return Ok(0.0);
        }

        let weight = match self.weight {
            Some(weight) => weight,
            None => Weight::standalone(self.idf(reader)?, self.boost, similarity),
        };
        let norm = match self.field() {
            Some(field) => reader.norm(doc, field)?,
            None => 1.0,
        };

        Ok(similarity.tf(freq) * weight.value() * norm * self.boost)
    }

    /// Sum of every term's IDF, alternates included.
    fn idf<R: IndexReader>(&self, reader: &R) -> Result<f32, R::Error> {
        let similarity = reader.similarity();
        let num_docs = reader.num_docs();
        let mut idf = 0.0;
        for term in &self.terms {
            idf += similarity.idf(reader.doc_freq(term)?, num_docs);
        }
        Ok(idf)
    }
}

impl Evaluate for PhraseQuery {
    fn create_weight<R: IndexReader>(&mut self, reader: &R) -> Result<(), R::Error> {
        self.weight = Some(Weight::new(self.idf(reader)?));
        Ok(())
    }

    fn sum_of_squared_weights(&mut self) -> f32 {
        let boost = self.boost;
        self.weight
            .as_mut()
            .map_or(0.0, |weight| weight.sum_of_squared_weights(boost))
    }

    fn normalize_weight(&mut self, query_norm: f32) {
        if let Some(weight) = self.weight.as_mut() {
            weight.normalize(query_norm);
        }
    }

    fn collect<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        self.positions = PositionCache::new();
        self.candidates = MatchedDocs::new();

        if self.terms.is_empty() {
            return Ok(());
        }
        check_single_field(&self.terms);

        let groups = self.offset_groups();
        let built = candidates::build_candidates(&self.terms, &groups, reader, filter)?;
        tracing::debug!(
            phrase = %self,
            candidates = built.docs.len(),
            "collected phrase candidates"
        );
        self.candidates = built.docs;
        self.positions = built.positions;
        Ok(())
    }
}

impl fmt::Display for PhraseQuery {
    /// `field:"w1 w2 (a|b)"~slop^boost`. Diagnostic only, not a parseable syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = self.field() {
            write!(f, "{}:", field)?;
        }
        f.write_str("\"")?;
        for (n, indices) in self.offset_groups().values().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            if let [single] = indices.as_slice() {
                f.write_str(self.terms[*single].text())?;
            } else {
                let texts: Vec<&str> = indices.iter().map(|&i| self.terms[i].text()).collect();
                write!(f, "({})", texts.join("|"))?;
            }
        }
        f.write_str("\"")?;
        if self.slop != 0 {
            write!(f, "~{}", self.slop)?;
        }
        write_boost(f, self.boost)
    }
}

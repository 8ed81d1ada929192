// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Any-of-these-terms queries.
//!
//! A phrase whose terms all sit at one offset is really "any of these words",
//! so it optimizes into a [`MultiTermQuery`]. Scores add up over the matching
//! terms and are scaled by how many of them matched (`coord`).

use super::{execute_top_level, write_boost, DisjunctionQuery, Evaluate, Query, TermQuery};
use crate::index::IndexReader;
use crate::scoring::Weight;
use crate::types::{DocFilter, DocId, MatchedDocs, Term, TermPositions};
use std::fmt;

#[derive(Debug, Clone)]
pub struct MultiTermQuery {
    terms: Vec<Term>,
    boost: f32,
    // One weight and one postings map per term, index-aligned with `terms`.
    weights: Vec<Weight>,
    positions: Vec<TermPositions>,
    docs: MatchedDocs,
}

impl PartialEq for MultiTermQuery {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms && self.boost == other.boost
    }
}

impl MultiTermQuery {
    pub fn new(terms: Vec<Term>) -> Self {
        Self {
            terms,
            boost: 1.0,
            weights: Vec::new(),
            positions: Vec::new(),
            docs: MatchedDocs::new(),
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    /// Unbound terms are bound to every indexed field, one copy per field.
    pub fn rewrite<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        if self.terms.is_empty() {
            return Ok(Query::Empty);
        }
        if self.terms.iter().all(|t| t.field().is_some()) {
            return Ok(Query::MultiTerm(self));
        }

        let fields = reader.field_names(true)?;
        let mut disjunction = DisjunctionQuery::new().with_boost(self.boost);
        for field in &fields {
            let bound = self
                .terms
                .iter()
                .map(|t| match t.field() {
                    Some(_) => t.clone(),
                    None => t.with_field(field),
                })
                .collect();
            disjunction.push(Query::MultiTerm(
                MultiTermQuery::new(bound).with_boost(self.boost),
            ));
        }
        Ok(Query::Disjunction(disjunction))
    }

    /// Drop terms the index has never seen; collapse to a [`TermQuery`] or
    /// [`Query::Empty`] when one or none survive.
    pub fn optimize<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        let boost = self.boost;
        let mut kept = Vec::with_capacity(self.terms.len());
        for term in self.terms {
            if reader.has_term(&term)? {
                kept.push(term);
            }
        }

        Ok(match kept.len() {
            0 => Query::Empty,
            1 => Query::Term(TermQuery::new(kept.swap_remove(0)).with_boost(boost)),
            _ => Query::MultiTerm(MultiTermQuery::new(kept).with_boost(boost)),
        })
    }

    pub fn execute<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        execute_top_level(self, reader, filter)
    }

    /// Documents holding at least one of the terms.
    pub fn matched_docs(&self) -> &MatchedDocs {
        &self.docs
    }

    /// `Σ tf(freq_i) * weight_i * norm(doc, field_i)`, times `coord` and boost.
    pub fn score<R: IndexReader>(&self, doc: DocId, reader: &R) -> Result<f32, R::Error> {
        if !self.docs.contains(&doc) {
            return Ok(0.0);
        }

        let similarity = reader.similarity();
        let mut sum = 0.0;
        let mut matched = 0;
        for ((term, weight), positions) in self.terms.iter().zip(&self.weights).zip(&self.positions)
        {
            let Some(freq) = positions.get(&doc).map(Vec::len).filter(|&n| n > 0) else {
                continue;
            };
            let norm = match term.field() {
                Some(field) => reader.norm(doc, field)?,
                None => 1.0,
            };
            sum += similarity.tf(freq as f32) * weight.value() * norm;
            matched += 1;
        }

        Ok(sum * similarity.coord(matched, self.terms.len()) * self.boost)
    }
}

impl Evaluate for MultiTermQuery {
    fn create_weight<R: IndexReader>(&mut self, reader: &R) -> Result<(), R::Error> {
        let similarity = reader.similarity();
        let num_docs = reader.num_docs();
        self.weights.clear();
        for term in &self.terms {
            let idf = similarity.idf(reader.doc_freq(term)?, num_docs);
            self.weights.push(Weight::new(idf));
        }
        Ok(())
    }

    fn sum_of_squared_weights(&mut self) -> f32 {
        let sum: f32 = self
            .weights
            .iter_mut()
            .map(|w| w.sum_of_squared_weights(1.0))
            .sum();
        sum * self.boost * self.boost
    }

    fn normalize_weight(&mut self, query_norm: f32) {
        let norm = query_norm * self.boost;
        for weight in &mut self.weights {
            weight.normalize(norm);
        }
    }

    fn collect<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        self.docs = MatchedDocs::new();
        self.positions = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let mut positions = reader.term_positions(term)?;
            if let Some(filter) = filter {
                positions.retain(|doc, _| filter.contains(doc));
            }
            self.docs.extend(positions.keys().copied());
            self.positions.push(positions);
        }
        tracing::trace!(terms = self.terms.len(), docs = self.docs.len(), "collected multi-term postings");
        Ok(())
    }
}

impl fmt::Display for MultiTermQuery {
    /// `(body:run body:ran)^boost`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", term)?;
        }
        f.write_str(")")?;
        write_boost(f, self.boost)
    }
}

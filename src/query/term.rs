// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-term queries. A one-word phrase optimizes into one of these.

use super::{execute_top_level, write_boost, DisjunctionQuery, Evaluate, Query};
use crate::index::IndexReader;
use crate::scoring::Weight;
use crate::types::{DocFilter, DocId, MatchedDocs, Term, TermPositions};
use std::fmt;

#[derive(Debug, Clone)]
pub struct TermQuery {
    term: Term,
    boost: f32,
    weight: Option<Weight>,
    positions: TermPositions,
    docs: MatchedDocs,
}

impl PartialEq for TermQuery {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term && self.boost == other.boost
    }
}

impl TermQuery {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            boost: 1.0,
            weight: None,
            positions: TermPositions::new(),
            docs: MatchedDocs::new(),
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    /// An unbound term becomes a disjunction with one copy per indexed field.
    pub fn rewrite<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        if self.term.field().is_some() {
            return Ok(Query::Term(self));
        }

        let mut disjunction = DisjunctionQuery::new().with_boost(self.boost);
        for field in reader.field_names(true)? {
            let bound = TermQuery::new(self.term.with_field(&field)).with_boost(self.boost);
            disjunction.push(Query::Term(bound));
        }
        Ok(Query::Disjunction(disjunction))
    }

    pub fn optimize<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        if reader.has_term(&self.term)? {
            Ok(Query::Term(self))
        } else {
            Ok(Query::Empty)
        }
    }

    pub fn execute<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        execute_top_level(self, reader, filter)
    }

    pub fn matched_docs(&self) -> &MatchedDocs {
        &self.docs
    }

    /// Occurrences of the term in `doc`, from the last execution.
    pub fn freq(&self, doc: DocId) -> u32 {
        self.positions.get(&doc).map_or(0, |p| p.len() as u32)
    }

    /// `tf(freq) * weight * norm(doc, field) * boost`.
    pub fn score<R: IndexReader>(&self, doc: DocId, reader: &R) -> Result<f32, R::Error> {
        if !self.docs.contains(&doc) {
            return Ok(0.0);
        }
        let freq = self.freq(doc);
        if freq == 0 {
            return Ok(0.0);
        }

        let similarity = reader.similarity();
        let weight = match self.weight {
            Some(weight) => weight,
            None => Weight::standalone(self.idf(reader)?, self.boost, similarity),
        };
        let norm = match self.term.field() {
            Some(field) => reader.norm(doc, field)?,
            None => 1.0,
        };

        Ok(similarity.tf(freq as f32) * weight.value() * norm * self.boost)
    }

    fn idf<R: IndexReader>(&self, reader: &R) -> Result<f32, R::Error> {
        let df = reader.doc_freq(&self.term)?;
        Ok(reader.similarity().idf(df, reader.num_docs()))
    }
}

impl Evaluate for TermQuery {
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
        let mut positions = reader.term_positions(&self.term)?;
        if let Some(filter) = filter {
            positions.retain(|doc, _| filter.contains(doc));
        }
        self.docs = positions.keys().copied().collect();
        self.positions = positions;
        tracing::trace!(term = %self.term, docs = self.docs.len(), "collected term postings");
        Ok(())
    }
}

impl fmt::Display for TermQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)?;
        write_boost(f, self.boost)
    }
}

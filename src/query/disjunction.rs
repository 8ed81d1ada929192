// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! OR of sub-queries. Produced by `rewrite` when a field-less query is spread
//! over every indexed field.

use super::{execute_top_level, write_boost, Evaluate, Query};
use crate::index::IndexReader;
use crate::types::{DocFilter, DocId, MatchedDocs};
use std::fmt;

#[derive(Debug, Clone)]
pub struct DisjunctionQuery {
    clauses: Vec<Query>,
    boost: f32,
    docs: MatchedDocs,
}

impl Default for DisjunctionQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DisjunctionQuery {
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses && self.boost == other.boost
    }
}

impl DisjunctionQuery {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            boost: 1.0,
            docs: MatchedDocs::new(),
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn push(&mut self, clause: Query) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Query] {
        &self.clauses
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    pub fn rewrite<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        let mut rewritten = DisjunctionQuery::new().with_boost(self.boost);
        for clause in self.clauses {
            rewritten.push(clause.rewrite(reader)?);
        }
        Ok(Query::Disjunction(rewritten))
    }

    /// Optimize every clause and drop the ones that can never match.
    ///
    /// A single surviving clause replaces the disjunction, taking on its boost.
    pub fn optimize<R: IndexReader>(self, reader: &R) -> Result<Query, R::Error> {
        let mut kept = Vec::with_capacity(self.clauses.len());
        for clause in self.clauses {
            let clause = clause.optimize(reader)?;
            if !clause.is_empty_result() {
                kept.push(clause);
            }
        }

        Ok(match kept.len() {
            0 => Query::Empty,
            1 => {
                let mut only = kept.swap_remove(0);
                only.set_boost(only.boost() * self.boost);
                only
            }
            _ => Query::Disjunction(DisjunctionQuery {
                clauses: kept,
                boost: self.boost,
                docs: MatchedDocs::new(),
            }),
        })
    }

    pub fn execute<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        execute_top_level(self, reader, filter)
    }

    /// Union of the clauses' candidates.
    pub fn matched_docs(&self) -> &MatchedDocs {
        &self.docs
    }

    /// Sum of the clauses' non-zero scores, times `coord` and boost.
    pub fn score<R: IndexReader>(&self, doc: DocId, reader: &R) -> Result<f32, R::Error> {
        if !self.docs.contains(&doc) {
            return Ok(0.0);
        }

        let mut sum = 0.0;
        let mut matched = 0;
        for clause in &self.clauses {
            let score = clause.score(doc, reader)?;
            if score > 0.0 {
                sum += score;
                matched += 1;
            }
        }
        if matched == 0 {
            return Ok(0.0);
        }

        let coord = reader.similarity().coord(matched, self.clauses.len());
        Ok(sum * coord * self.boost)
    }
}

impl Evaluate for DisjunctionQuery {
    fn create_weight<R: IndexReader>(&mut self, reader: &R) -> Result<(), R::Error> {
        for clause in &mut self.clauses {
            clause.create_weight(reader)?;
        }
        Ok(())
    }

    fn sum_of_squared_weights(&mut self) -> f32 {
        let sum: f32 = self
            .clauses
            .iter_mut()
            .map(|clause| clause.sum_of_squared_weights())
            .sum();
        sum * self.boost * self.boost
    }

    fn normalize_weight(&mut self, query_norm: f32) {
        let norm = query_norm * self.boost;
        for clause in &mut self.clauses {
            clause.normalize_weight(norm);
        }
    }

    fn collect<R: IndexReader>(
        &mut self,
        reader: &R,
        filter: Option<&DocFilter>,
    ) -> Result<(), R::Error> {
        self.docs = MatchedDocs::new();
        for clause in &mut self.clauses {
            clause.collect(reader, filter)?;
            self.docs.extend(clause.matched_docs().iter().copied());
        }
        Ok(())
    }
}

impl fmt::Display for DisjunctionQuery {
    /// `(title:"quick fox" OR body:"quick fox")^boost`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" OR ")?;
            }
            write!(f, "{}", clause)?;
        }
        f.write_str(")")?;
        write_boost(f, self.boost)
    }
}

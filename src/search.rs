// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Top-level search: run a query through its whole lifecycle and rank.
//!
//! ```text
//! Query ─▶ rewrite ─▶ optimize ─▶ execute(filter) ─▶ score every candidate ─▶ top-k
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! - Hits are ordered by score descending, then doc id ascending
//! - Only documents with a score above `min_score` are returned
//! - Every hit is a member of the executed query's `matched_docs`

use crate::index::IndexReader;
use crate::query::Query;
use crate::types::{DocFilter, DocId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Knobs for a single search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Maximum number of hits.
    pub limit: usize,
    /// Hits must score strictly above this.
    pub min_score: f32,
    /// Restrict candidates to these documents.
    pub filter: Option<DocFilter>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            min_score: 0.0,
            filter: None,
        }
    }
}

/// A scored document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc: DocId,
    pub score: f32,
}

/// Runs queries against one reader.
pub struct Searcher<'a, R: IndexReader> {
    reader: &'a R,
}

impl<'a, R: IndexReader> Searcher<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &'a R {
        self.reader
    }

    /// Rewrite and optimize `query` against this reader without executing it.
    pub fn prepare(&self, query: Query) -> Result<Query, R::Error> {
        query.rewrite(self.reader)?.optimize(self.reader)
    }

    /// Run `query` and return its best hits.
    pub fn search(&self, query: Query, options: &SearchOptions) -> Result<Vec<SearchHit>, R::Error> {
        let span = tracing::debug_span!("search", query = %query, limit = options.limit);
        let _enter = span.enter();

        let mut query = self.prepare(query)?;
        tracing::debug!(prepared = %query, "query prepared");
        if query.is_empty_result() {
            return Ok(Vec::new());
        }

        query.execute(self.reader, options.filter.as_ref())?;

        let mut hits = Vec::with_capacity(query.matched_docs().len());
        for &doc in query.matched_docs() {
            let score = query.score(doc, self.reader)?;
            if score > options.min_score {
                hits.push(SearchHit { doc, score });
            }
        }

        hits.sort_by(compare_hits);
        hits.truncate(options.limit);

        tracing::debug!(
            candidates = query.matched_docs().len(),
            hits = hits.len(),
            "search complete"
        );
        Ok(hits)
    }
}

/// Score descending, then doc ascending. NaN sorts last.
fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or_else(|| a.score.is_nan().cmp(&b.score.is_nan()))
        .then_with(|| a.doc.cmp(&b.doc))
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-query IDF weight.
//!
//! A weight goes through three steps, always in this order:
//!
//! 1. `new(idf)` once the query has seen the index
//! 2. `sum_of_squared_weights(boost)` feeds the top-level query norm
//! 3. `normalize(query_norm)` fixes the value used for scoring
//!
//! Only `value()` is read at score time.

use super::Similarity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    idf: f32,
    query_weight: f32,
    value: f32,
}

impl Weight {
    pub fn new(idf: f32) -> Self {
        Self {
            idf,
            query_weight: idf,
            value: idf,
        }
    }

    /// A weight normalized against itself, for queries scored without a parent.
    pub fn standalone(idf: f32, boost: f32, similarity: &dyn Similarity) -> Self {
        let mut weight = Self::new(idf);
        let sum = weight.sum_of_squared_weights(boost);
        weight.normalize(similarity.query_norm(sum));
        weight
    }

    pub fn idf(&self) -> f32 {
        self.idf
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn sum_of_squared_weights(&mut self, boost: f32) -> f32 {
        self.query_weight = self.idf * boost;
        self.query_weight * self.query_weight
    }

    pub fn normalize(&mut self, query_norm: f32) {
        self.query_weight *= query_norm;
        self.value = self.query_weight * self.idf;
    }
}

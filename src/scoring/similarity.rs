// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind phrase ranking.
//!
//! A phrase match scores `tf(freq) * weight * norm * boost`. None of those
//! factors are computed by the matcher itself: the term-frequency curve, the
//! sloppy decay, IDF and query normalization all come from a [`Similarity`].
//! Swap the similarity and every query class picks up the new formula.
//!
//! # Classic formulas
//!
//! | Function       | Formula                                   |
//! |----------------|-------------------------------------------|
//! | `tf`           | `sqrt(freq)`                              |
//! | `sloppy_freq`  | `1 / (distance + 1)`                      |
//! | `idf`          | `ln(num_docs / (doc_freq + 1)) + 1`       |
//! | `query_norm`   | `1 / sqrt(sum_of_squared_weights)`        |
//! | `coord`        | `overlap / max_overlap`                   |
//! | `length_norm`  | `1 / sqrt(num_tokens)`                    |
//!
//! Norms are stored as a single byte (3-bit mantissa, 5-bit exponent), so a
//! decoded norm is only an approximation of `length_norm`. Scores are computed
//! from the decoded value, never the exact one.

use super::norm::{byte315_to_float, float_to_byte315};

/// Relevance model consumed by every query class.
///
/// All methods are pure. Implementations must be deterministic so that
/// re-scoring the same document always yields the same bits.
pub trait Similarity: Send + Sync {
    /// Score contribution of a raw (possibly fractional) match frequency.
    fn tf(&self, freq: f32) -> f32;

    /// Weight of a sloppy phrase instance found at edit `distance`.
    ///
    /// Must decrease monotonically as `distance` grows.
    fn sloppy_freq(&self, distance: u32) -> f32;

    /// Inverse document frequency of a term.
    fn idf(&self, doc_freq: usize, num_docs: usize) -> f32;

    /// Normalizes a query's weights so scores are comparable across queries.
    fn query_norm(&self, sum_of_squared_weights: f32) -> f32;

    /// Fraction of a disjunction's clauses that matched a document.
    fn coord(&self, overlap: usize, max_overlap: usize) -> f32;

    /// Field length normalization computed at indexing time.
    fn length_norm(&self, field: &str, num_tokens: usize) -> f32;

    /// Encode a norm into its stored single-byte form.
    fn encode_norm(&self, norm: f32) -> u8 {
        float_to_byte315(norm)
    }

    /// Decode a stored norm byte.
    fn decode_norm(&self, byte: u8) -> f32 {
        byte315_to_float(byte)
    }
}

/// The classic TF-IDF similarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicSimilarity;

impl Similarity for ClassicSimilarity {
    fn tf(&self, freq: f32) -> f32 {
        freq.sqrt()
    }

    fn sloppy_freq(&self, distance: u32) -> f32 {
        1.0 / (distance as f32 + 1.0)
    }

    fn idf(&self, doc_freq: usize, num_docs: usize) -> f32 {
        ((num_docs as f64 / (doc_freq as f64 + 1.0)).ln() + 1.0) as f32
    }

    fn query_norm(&self, sum_of_squared_weights: f32) -> f32 {
        // An all-zero query would otherwise normalize to infinity.
        if sum_of_squared_weights <= 0.0 {
            return 1.0;
        }
        1.0 / sum_of_squared_weights.sqrt()
    }

    fn coord(&self, overlap: usize, max_overlap: usize) -> f32 {
        if max_overlap == 0 {
            return 0.0;
        }
        overlap as f32 / max_overlap as f32
    }

    fn length_norm(&self, _field: &str, num_tokens: usize) -> f32 {
        if num_tokens == 0 {
            return 1.0;
        }
        1.0 / (num_tokens as f32).sqrt()
    }
}

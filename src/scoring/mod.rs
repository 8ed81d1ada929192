// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: the relevance model and its query weights.
//!
//! The similarity owns every formula. Weights carry the per-query IDF and its
//! normalization so that scoring a document is a handful of multiplications.

pub mod norm;
mod similarity;
mod weight;

pub use similarity::{ClassicSimilarity, Similarity};
pub use weight::Weight;

//! Runtime contracts for the phrase engine.
//!
//! Debug-mode assertions for the invariants the matchers depend on. They
//! compile to nothing in release builds and fail loudly while tests run.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function             | Property                                      |
//! |-------------------------------|-----------------------------------------------|
//! | `check_terms_offsets_aligned` | `terms.len() == offsets.len()`                |
//! | `check_single_field`          | every term of a phrase shares one field       |
//! | `check_positions_sorted`      | position lists strictly ascending             |
//! | `check_docs_ascending`        | provider doc lists strictly ascending         |
//!
//! # Usage
//!
//! ```ignore
//! use phrasematch::contracts::*;
//!
//! // In debug builds, this panics if invariant is violated
//! check_terms_offsets_aligned(&terms, &offsets);
//! ```

use crate::types::{DocId, Term};

// ============================================================================
// PHRASE SHAPE CONTRACTS
// ============================================================================

/// Terms and offsets line up index-for-index.
///
/// # Panics (debug builds only)
/// Panics if the lengths differ.
#[inline]
pub fn check_terms_offsets_aligned(terms: &[Term], offsets: &[u32]) {
    debug_assert_eq!(
        terms.len(),
        offsets.len(),
        "Contract violation: {} terms but {} offsets",
        terms.len(),
        offsets.len()
    );
}

/// All terms of one phrase carry the same field (or all none).
#[inline]
pub fn check_single_field(terms: &[Term]) {
    if let Some(first) = terms.first() {
        for (i, term) in terms.iter().enumerate().skip(1) {
            debug_assert_eq!(
                term.field(),
                first.field(),
                "Contract violation: terms[{}] field {:?} != terms[0] field {:?}",
                i,
                term.field(),
                first.field()
            );
        }
    }
}

// ============================================================================
// POSTING CONTRACTS
// ============================================================================

/// A position list is strictly ascending.
///
/// The exact matcher binary-searches these lists; an unsorted list silently
/// drops matches.
#[inline]
pub fn check_positions_sorted(positions: &[u32]) {
    for i in 1..positions.len() {
        debug_assert!(
            positions[i - 1] < positions[i],
            "Contract violation: positions not ascending at {}: {} >= {}",
            i,
            positions[i - 1],
            positions[i]
        );
    }
}

/// A provider's document list is strictly ascending.
#[inline]
pub fn check_docs_ascending(docs: &[DocId]) {
    for i in 1..docs.len() {
        debug_assert!(
            docs[i - 1] < docs[i],
            "Contract violation: doc ids not ascending at {}: {} >= {}",
            i,
            docs[i - 1],
            docs[i]
        );
    }
}

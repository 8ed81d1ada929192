// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Construction-time failures.
//!
//! These are contract violations by the caller, reported by the call that
//! introduced them. Failures from the index itself are not wrapped here: query
//! operations return the reader's own error type untouched.

use thiserror::Error;

/// A phrase was built in a way the engine cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Parallel word and offset arrays have different lengths.
    #[error("{words} words but {offsets} offsets")]
    MismatchedOffsets { words: usize, offsets: usize },

    /// A term's field differs from the field the phrase already uses.
    #[error("term field {found:?} conflicts with phrase field {expected:?}")]
    FieldConflict {
        expected: Option<String>,
        found: Option<String>,
    },

    /// Alternates (several terms at one offset) cannot be combined with slop.
    #[error("alternate terms at offset {offset} cannot be combined with slop {slop}")]
    AlternatesWithSlop { offset: u32, slop: u32 },

    /// The next implicit offset would be past `u32::MAX`.
    #[error("no offset follows {last}")]
    OffsetOverflow { last: u32 },
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary every other module speaks.
//!
//! A phrase is a list of [`Term`]s, each pinned to an offset inside the pattern.
//! The index answers questions about terms in terms of [`DocId`]s and token
//! positions. Everything here is plain data: cheap to clone, comparable by value,
//! and hashable so it can key the per-execution position cache.
//!
//! # Invariants
//!
//! - **TermPositions**: every position list is sorted ascending without duplicates.
//! - **MatchedDocs**: iteration is ascending by `DocId`. Consumers rely on this.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Keeps token positions and document ids from being mixed up; both are `u32`
/// underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TERMS
// =============================================================================

/// An immutable `(field, text)` pair.
///
/// A term without a field is a wildcard: it has not been bound to any field yet
/// and only becomes searchable after `rewrite` qualifies it against an index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    field: Option<String>,
    text: String,
}

impl Term {
    /// A term bound to `field`.
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            text: text.into(),
        }
    }

    /// A term not yet bound to any field.
    pub fn unbound(text: impl Into<String>) -> Self {
        Self {
            field: None,
            text: text.into(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Same text, qualified with `field`.
    pub fn with_field(&self, field: &str) -> Self {
        Self::new(field, self.text.clone())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}:{}", field, self.text),
            None => f.write_str(&self.text),
        }
    }
}

// =============================================================================
// POSTINGS
// =============================================================================

/// Per-document token positions for a single term, ascending within each list.
pub type TermPositions = BTreeMap<DocId, Vec<u32>>;

/// Documents a query is allowed to match. Applied as one more intersection group.
pub type DocFilter = BTreeSet<DocId>;

/// Candidate documents produced by `execute`, iterated in ascending id order.
pub type MatchedDocs = BTreeSet<DocId>;

/// Position lists fetched during one execution, keyed by term value.
///
/// Built fresh by every `execute` and dropped wholesale by the next one.
pub type PositionCache = HashMap<Term, TermPositions>;

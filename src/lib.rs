// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phrase matching and scoring over a positional inverted index.
//!
//! A phrase query finds documents where a sequence of terms appears at given
//! relative positions, either exactly or within an edit budget (slop), and
//! scores each match with a pluggable relevance model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  types.rs   │────▶│  query/phrase    │────▶│    search.rs     │
//! │ (Term,      │     │ (candidates,     │     │ (Searcher,       │
//! │  DocId)     │     │  exact, sloppy)  │     │  SearchHit)      │
//! └─────────────┘     └──────────────────┘     └──────────────────┘
//!        │                     │                        │
//!        ▼                     ▼                        ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  index (IndexReader, MemoryIndex)   scoring (Similarity,     │
//! │                                      Weight, norm bytes)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use phrasematch::{MemoryIndex, PhraseQuery, SearchOptions, Searcher};
//!
//! let index = MemoryIndex::from_texts("body", &["the quick brown fox", "a quick fox"]);
//! let phrase = PhraseQuery::from_words(&["quick", "fox"], None, Some("body")).unwrap();
//!
//! let hits = Searcher::new(&index)
//!     .search(phrase.into(), &SearchOptions::default())
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].doc.get(), 1);
//! ```

pub mod contracts;
mod error;
pub mod index;
pub mod query;
pub mod scoring;
mod search;
pub mod testing;
mod types;
mod utils;

pub use error::QueryError;
pub use index::{tokenize, IndexReader, MemoryIndex, MemoryIndexBuilder};
pub use query::phrase::{exact_phrase_freq, min_deviation, sloppy_phrase_freq};
pub use query::{DisjunctionQuery, MultiTermQuery, PhraseQuery, Query, TermQuery};
pub use scoring::{ClassicSimilarity, Similarity, Weight};
pub use search::{SearchHit, SearchOptions, Searcher};
pub use types::{DocFilter, DocId, MatchedDocs, PositionCache, Term, TermPositions};
pub use utils::fold_term;

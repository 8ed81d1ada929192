// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the phrasematch command-line interface.
//!
//! Two subcommands, both reading a JSON corpus (an array of objects mapping
//! field name to text): `search` ranks documents for a phrase, `explain` shows
//! how one document scores against it.
//!
//! Phrases are written as space-separated words. `|` joins alternates that
//! share a position, so `"run|ran fast"` matches both "run fast" and "ran fast".

pub mod display;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use phrasematch::{fold_term, MemoryIndex, PhraseQuery, QueryError, Term};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "phrasematch",
    about = "Exact and sloppy phrase search over a JSON corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank documents matching a phrase
    Search {
        #[command(flatten)]
        phrase: PhraseArgs,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Only return hits scoring above this
        #[arg(long, default_value = "0")]
        min_score: f32,

        /// Print hits as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how a single document scores against a phrase
    Explain {
        #[command(flatten)]
        phrase: PhraseArgs,

        /// Document id (0-based position in the corpus)
        #[arg(short, long)]
        doc: u32,
    },
}

/// Arguments shared by every subcommand.
#[derive(Args)]
pub struct PhraseArgs {
    /// Path to the corpus: a JSON array of `{ "field": "text", ... }` objects
    #[arg(short, long)]
    pub corpus: PathBuf,

    /// Phrase to match; `|` separates alternates at one position
    pub phrase: String,

    /// Field to search. Searches every field when omitted
    #[arg(short, long)]
    pub field: Option<String>,

    /// Allowed edit distance between the phrase and a match
    #[arg(short, long, default_value = "0")]
    pub slop: u32,

    /// Multiply every score by this factor
    #[arg(short, long, default_value = "1")]
    pub boost: f32,
}

impl PhraseArgs {
    pub fn load(&self) -> Result<(MemoryIndex, PhraseQuery)> {
        let index = load_corpus(&self.corpus)?;
        let query = parse_phrase(&self.phrase, self.field.as_deref(), self.slop)
            .with_context(|| format!("invalid phrase {:?}", self.phrase))?
            .with_boost(self.boost);
        Ok((index, query))
    }
}

/// Build an in-memory index from a JSON corpus file.
pub fn load_corpus(path: &Path) -> Result<MemoryIndex> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus {}", path.display()))?;
    let docs: Vec<BTreeMap<String, String>> = serde_json::from_str(&raw)
        .with_context(|| format!("corpus {} is not an array of field maps", path.display()))?;
    if docs.is_empty() {
        bail!("corpus {} has no documents", path.display());
    }

    let mut builder = MemoryIndex::builder();
    for doc in &docs {
        builder.add_document(doc);
    }
    tracing::info!(docs = docs.len(), corpus = %path.display(), "loaded corpus");
    Ok(builder.build())
}

/// Parse `"run|ran fast"` into a phrase. Words are normalized the same way the
/// index normalizes tokens.
pub fn parse_phrase(
    text: &str,
    field: Option<&str>,
    slop: u32,
) -> std::result::Result<PhraseQuery, QueryError> {
    let mut phrase = PhraseQuery::new();
    let mut offset = 0;
    for slot in text.split_whitespace() {
        let mut added = false;
        for word in slot.split('|').map(fold_term).filter(|w| !w.is_empty()) {
            let term = match field {
                Some(field) => Term::new(field, word),
                None => Term::unbound(word),
            };
            phrase.add_term(term, Some(offset))?;
            added = true;
        }
        if added {
            offset += 1;
        }
    }
    phrase.set_slop(slop)?;
    Ok(phrase)
}

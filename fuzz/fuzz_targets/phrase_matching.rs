// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the phrase matchers.
//!
//! Builds a tiny index from arbitrary token streams and an arbitrary phrase,
//! then checks the search invariants hold whatever the input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use phrasematch::{DocId, MemoryIndex, PhraseQuery, Query, SearchOptions, Searcher};

const VOCAB: &[&str] = &["a", "b", "c", "d"];

#[derive(Debug, Arbitrary)]
struct Input {
    docs: Vec<Vec<u8>>,
    words: Vec<(u8, u8)>,
    slop: u8,
}

fuzz_target!(|input: Input| {
    let docs: Vec<String> = input
        .docs
        .iter()
        .take(16)
        .map(|doc| {
            doc.iter()
                .take(32)
                .map(|&w| VOCAB[w as usize % VOCAB.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let index = MemoryIndex::from_texts("body", &docs);

    let mut phrase = PhraseQuery::new();
    for &(word, offset) in input.words.iter().take(6) {
        let term = phrasematch::Term::new("body", VOCAB[word as usize % VOCAB.len()]);
        let _ = phrase.add_term(term, Some(u32::from(offset % 8)));
    }
    // Alternates make slop invalid; both outcomes are fine here.
    let _ = phrase.set_slop(u32::from(input.slop % 4));

    let options = SearchOptions {
        limit: 100,
        ..SearchOptions::default()
    };
    let hits = match Searcher::new(&index).search(Query::Phrase(phrase), &options) {
        Ok(hits) => hits,
        Err(never) => match never {},
    };

    // INVARIANT 1: hits reference real documents
    for hit in &hits {
        assert!(hit.doc < DocId(docs.len() as u32), "hit {} out of range", hit.doc);
        assert!(hit.score > 0.0 && hit.score.is_finite(), "bad score {}", hit.score);
    }

    // INVARIANT 2: ordering is score descending, then doc ascending
    for pair in hits.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].doc < pair[1].doc),
            "hits out of order: {:?}",
            pair
        );
    }
});

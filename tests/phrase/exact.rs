//! Exact (slop 0) matching through the full query lifecycle.

use crate::common::*;
use phrasematch::{exact_phrase_freq, DocId, PhraseQuery, PositionCache, Query, Term, TermPositions};

#[test]
fn test_two_aligned_occurrences() {
    // quick at [0, 5], fox at [1, 6].
    let index = body_index(&["quick fox jumps and a quick fox"]);
    let mut phrase = body_phrase(&["quick", "fox"]);
    phrase.execute(&index, None).unwrap();
    assert_eq!(phrase.phrase_freq(DocId(0), &phrasematch::ClassicSimilarity), 2.0);
}

#[test]
fn test_matcher_counts_from_position_cache() {
    let quick: TermPositions = [(DocId(0), vec![0, 5])].into_iter().collect();
    let fox: TermPositions = [(DocId(0), vec![1, 6])].into_iter().collect();
    let positions: PositionCache = [
        (Term::new("body", "quick"), quick),
        (Term::new("body", "fox"), fox),
    ]
    .into_iter()
    .collect();
    let terms = [Term::new("body", "quick"), Term::new("body", "fox")];
    assert_eq!(exact_phrase_freq(&terms, &[0, 1], &positions, DocId(0)), 2);
}

#[test]
fn test_candidate_with_zero_score() {
    // Both words occur in doc 0, never adjacent in order.
    let index = body_index(&["fox then quick", "quick fox"]);
    let mut query: Query = body_phrase(&["quick", "fox"]).into();
    query.execute(&index, None).unwrap();

    assert!(query.matched_docs().contains(&DocId(0)));
    assert_eq!(query.score(DocId(0), &index).unwrap(), 0.0);
    assert!(query.score(DocId(1), &index).unwrap() > 0.0);
    assert_eq!(hit_docs(&index, body_phrase(&["quick", "fox"])), vec![DocId(1)]);
}

#[test]
fn test_non_candidate_scores_zero() {
    let index = body_index(&["quick fox", "lazy dog"]);
    assert_eq!(score_of(&index, body_phrase(&["quick", "fox"]), DocId(1)), 0.0);
}

#[test]
fn test_more_occurrences_score_higher_at_equal_length() {
    let index = body_index(&["quick fox quick fox", "quick fox lazy dogs"]);
    let hits = search(&index, body_phrase(&["quick", "fox"]));
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc, DocId(0));
    assert_ranked(&hits);
}

#[test]
fn test_shorter_field_scores_higher() {
    let index = body_index(&["a quick fox with many other words around", "quick fox"]);
    let hits = search(&index, body_phrase(&["quick", "fox"]));
    assert_eq!(hits[0].doc, DocId(1));
}

#[test]
fn test_boost_scales_score() {
    let index = body_index(&["quick fox", "slow dog"]);
    let plain = score_of(&index, body_phrase(&["quick", "fox"]), DocId(0));
    let boosted = score_of(&index, body_phrase(&["quick", "fox"]).with_boost(2.0), DocId(0));
    assert!(boosted > plain);
}

#[test]
fn test_offsets_with_gap() {
    let index = body_index(&["quick brown fox", "quick fox"]);
    let phrase = PhraseQuery::from_words(&["quick", "fox"], Some(&[0, 2]), Some("body")).unwrap();
    assert_eq!(hit_docs(&index, phrase), vec![DocId(0)]);
}

#[test]
fn test_repeated_field_values_continue_positions() {
    let mut builder = phrasematch::MemoryIndex::builder();
    builder.add_document([("body", "the quick"), ("body", "fox")]);
    let index = builder.build();
    // Positions continue across values, so "quick" (1) and "fox" (2) are adjacent.
    assert_eq!(hit_docs(&index, body_phrase(&["quick", "fox"])), vec![DocId(0)]);
}

#[test]
fn test_diacritics_normalized() {
    let index = body_index(&["Café Society"]);
    assert_eq!(hit_docs(&index, body_phrase(&["cafe", "society"])), vec![DocId(0)]);
}

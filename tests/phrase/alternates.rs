//! Several terms at one offset.

use crate::common::*;
use phrasematch::{DocId, PhraseQuery, Query, QueryError};

fn run_ran_fast() -> PhraseQuery {
    PhraseQuery::from_words(&["run", "ran", "fast"], Some(&[0, 0, 1]), Some("body")).unwrap()
}

#[test]
fn test_any_alternate_fills_slot() {
    let index = body_index(&["ran fast", "run fast", "walk fast"]);
    assert_eq!(hit_docs(&index, run_ran_fast()), vec![DocId(0), DocId(1)]);
}

#[test]
fn test_absent_alternate_does_not_block_match() {
    // "run" never occurs anywhere.
    let index = body_index(&["ran fast"]);
    let mut query: Query = run_ran_fast().into();
    query = query.optimize(&index).unwrap();
    query.execute(&index, None).unwrap();
    assert!(query.score(DocId(0), &index).unwrap() > 0.0);
}

#[test]
fn test_without_optimize_alternates_still_match() {
    let index = body_index(&["ran fast"]);
    let mut phrase = run_ran_fast();
    phrase.execute(&index, None).unwrap();
    assert_eq!(phrase.phrase_freq(DocId(0), &phrasematch::ClassicSimilarity), 1.0);
}

#[test]
fn test_all_terms_at_one_offset_match_any_word() {
    let index = body_index(&["run", "ran", "walk"]);
    let phrase =
        PhraseQuery::from_words(&["run", "ran"], Some(&[0, 0]), Some("body")).unwrap();
    assert_eq!(hit_docs(&index, phrase), vec![DocId(0), DocId(1)]);
}

#[test]
fn test_slop_with_alternates_rejected() {
    let err = run_ran_fast().with_slop(1).unwrap_err();
    assert_eq!(err, QueryError::AlternatesWithSlop { offset: 0, slop: 1 });
}

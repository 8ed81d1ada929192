//! Sloppy (slop > 0) matching through the full query lifecycle.

use crate::common::*;
use phrasematch::{ClassicSimilarity, DocId, Similarity};

#[test]
fn test_one_word_gap_counts_at_distance_one() {
    // quick at 3, fox at 5: one word too far apart.
    let index = body_index(&["a b c quick x fox"]);
    let mut phrase = body_phrase(&["quick", "fox"]).with_slop(1).unwrap();
    phrase.execute(&index, None).unwrap();
    let freq = phrase.phrase_freq(DocId(0), &ClassicSimilarity);
    assert_eq!(freq, ClassicSimilarity.sloppy_freq(1));
    assert!(freq < ClassicSimilarity.sloppy_freq(0));
}

#[test]
fn test_slop_zero_rejects_gap() {
    let index = body_index(&["quick x fox"]);
    assert!(hit_docs(&index, body_phrase(&["quick", "fox"])).is_empty());
}

#[test]
fn test_closer_match_scores_higher() {
    let index = body_index(&["quick fox aa bb", "quick aa fox bb"]);
    let phrase = body_phrase(&["quick", "fox"]).with_slop(2).unwrap();
    let hits = search(&index, phrase);
    assert_eq!(hits.iter().map(|h| h.doc).collect::<Vec<_>>(), vec![DocId(0), DocId(1)]);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn test_transposition_needs_slop_two() {
    let index = body_index(&["fox quick"]);
    let within = body_phrase(&["quick", "fox"]).with_slop(2).unwrap();
    let outside = body_phrase(&["quick", "fox"]).with_slop(1).unwrap();
    assert_eq!(hit_docs(&index, within), vec![DocId(0)]);
    assert!(hit_docs(&index, outside).is_empty());
}

#[test]
fn test_three_terms_within_slop() {
    let index = body_index(&["quick brown x fox", "quick x y brown z w fox"]);
    let phrase = body_phrase(&["quick", "brown", "fox"]).with_slop(1).unwrap();
    assert_eq!(hit_docs(&index, phrase), vec![DocId(0)]);
}

#[test]
fn test_display_includes_slop() {
    let phrase = body_phrase(&["quick", "fox"]).with_slop(3).unwrap();
    assert_eq!(phrase.to_string(), "body:\"quick fox\"~3");
}

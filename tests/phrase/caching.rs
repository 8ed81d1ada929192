//! Postings are read once per execution and reused for every document.

use crate::common::*;
use phrasematch::{ClassicSimilarity, DocId, PhraseQuery};

fn reader() -> CountingReader {
    CountingReader::new(body_index(&[
        "the quick brown fox",
        "a quick fox and a quick fox",
        "quick fox",
        "fox quick",
    ]))
}

fn assert_scoring_reads_nothing(reader: &CountingReader, phrase: &PhraseQuery) {
    let before = reader.fetches();
    for &doc in phrase.matched_docs() {
        phrase.score(doc, reader).unwrap();
        phrase.phrase_freq(doc, &ClassicSimilarity);
    }
    assert_eq!(reader.fetches(), before);
}

#[test]
fn test_exact_scoring_does_not_refetch() {
    let reader = reader();
    let mut phrase = body_phrase(&["quick", "fox"]);
    phrase.execute(&reader, None).unwrap();
    assert!(phrase.matched_docs().len() >= 2);
    assert_scoring_reads_nothing(&reader, &phrase);
}

#[test]
fn test_sloppy_scoring_does_not_refetch() {
    let reader = reader();
    let mut phrase = body_phrase(&["quick", "fox"]).with_slop(2).unwrap();
    phrase.execute(&reader, None).unwrap();
    assert_scoring_reads_nothing(&reader, &phrase);
}

#[test]
fn test_alternates_scoring_does_not_refetch() {
    let reader = reader();
    let mut phrase =
        PhraseQuery::from_words(&["quick", "brown", "fox"], Some(&[0, 1, 1]), Some("body"))
            .unwrap();
    phrase.execute(&reader, None).unwrap();
    assert!(phrase.matched_docs().contains(&DocId(0)));
    assert_scoring_reads_nothing(&reader, &phrase);
}

#[test]
fn test_positions_fetched_once_per_distinct_term() {
    let reader = reader();
    let mut phrase = body_phrase(&["quick", "fox", "quick", "fox"]);
    phrase.execute(&reader, None).unwrap();
    assert_eq!(reader.fetches().1, 2);
}

#[test]
fn test_second_execute_fetches_again() {
    let reader = reader();
    let mut phrase = body_phrase(&["quick", "fox"]);

    phrase.execute(&reader, None).unwrap();
    let first = reader.fetches();
    assert!(first.1 > 0);

    phrase.execute(&reader, None).unwrap();
    let second = reader.fetches();
    assert_eq!(second.1, first.1 * 2);
    assert!(second.0 >= first.0);
    assert_scoring_reads_nothing(&reader, &phrase);
}

//! Construction errors and provider failures.

use crate::common::*;
use phrasematch::{DocId, PhraseQuery, Query, QueryError, Term};

#[test]
fn test_mismatched_offsets() {
    let err = PhraseQuery::from_words(&["a", "b", "c"], Some(&[0, 1]), None).unwrap_err();
    assert_eq!(err, QueryError::MismatchedOffsets { words: 3, offsets: 2 });
    assert_eq!(err.to_string(), "3 words but 2 offsets");
}

#[test]
fn test_field_conflict_leaves_phrase_unchanged() {
    let mut phrase = body_phrase(&["quick"]);
    let err = phrase.add_term(Term::new("title", "fox"), None).unwrap_err();
    assert_eq!(
        err,
        QueryError::FieldConflict {
            expected: Some("body".to_string()),
            found: Some("title".to_string()),
        }
    );
    assert_eq!(phrase.terms().len(), phrase.offsets().len());
    assert_eq!(phrase.len(), 1);
}

#[test]
fn test_provider_error_propagates_from_execute() {
    let reader = FailingReader::default();
    let mut query: Query = body_phrase(&["quick", "fox"]).into();
    let err = query.execute(&reader, None).unwrap_err();
    assert_eq!(err, StorageFailure("term_docs"));
}

#[test]
fn test_provider_error_propagates_from_search() {
    let reader = FailingReader::default();
    let err = phrasematch::Searcher::new(&reader)
        .search(body_phrase(&["quick", "fox"]).into(), &Default::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "storage failure in term_docs");
}

#[test]
fn test_unbound_phrase_against_failing_reader_rewrites() {
    // field_names succeeds, so rewrite works; execution is where postings fail.
    let reader = FailingReader::default();
    let phrase = PhraseQuery::from_words(&["quick", "fox"], None, None).unwrap();
    let rewritten = Query::Phrase(phrase).rewrite(&reader).unwrap();
    assert!(matches!(rewritten, Query::Disjunction(_)));
    assert_eq!(rewritten.score(DocId(0), &reader).unwrap(), 0.0);
}

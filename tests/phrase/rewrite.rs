//! Rewrite and optimize.

use crate::common::*;
use phrasematch::{DocId, PhraseQuery, Query, Term};

#[test]
fn test_unbound_phrase_rewrites_per_field() {
    let index = titled_index(&[("quick fox", "lazy dog")]);
    let phrase = PhraseQuery::from_words(&["quick", "fox"], None, None)
        .unwrap()
        .with_slop(1)
        .unwrap()
        .with_boost(2.0);

    let rewritten = Query::Phrase(phrase).rewrite(&index).unwrap();
    let Query::Disjunction(disjunction) = &rewritten else {
        panic!("expected disjunction, got {rewritten}");
    };
    assert_eq!(disjunction.boost(), 2.0);
    assert_eq!(disjunction.clauses().len(), 2);

    let mut fields = Vec::new();
    for clause in disjunction.clauses() {
        let Query::Phrase(copy) = clause else {
            panic!("expected phrase clause, got {clause}");
        };
        assert_eq!(copy.slop(), 1);
        assert_eq!(copy.boost(), 2.0);
        assert_eq!(copy.offsets(), &[0, 1]);
        fields.push(copy.field().map(str::to_string));
    }
    assert_eq!(fields, vec![Some("body".to_string()), Some("title".to_string())]);
}

#[test]
fn test_unbound_phrase_searches_every_field() {
    let index = titled_index(&[("quick fox", "lazy dog"), ("lazy dog", "quick fox"), ("x", "y")]);
    let phrase = PhraseQuery::from_words(&["quick", "fox"], None, None).unwrap();
    assert_eq!(hit_docs(&index, phrase), vec![DocId(0), DocId(1)]);
}

#[test]
fn test_single_term_keeps_boost() {
    let index = body_index(&["quick fox"]);
    let phrase = body_phrase(&["fox"]).with_boost(4.0);
    let optimized = Query::Phrase(phrase).optimize(&index).unwrap();
    match &optimized {
        Query::Term(term) => assert_eq!(term.term(), &Term::new("body", "fox")),
        other => panic!("expected term query, got {other}"),
    }
    assert_eq!(optimized.boost(), 4.0);
}

#[test]
fn test_zero_term_phrase_is_empty_everywhere() {
    let index = body_index(&["quick fox"]);
    assert!(PhraseQuery::new().rewrite(&index).unwrap().is_empty_result());
    assert!(PhraseQuery::new().optimize(&index).unwrap().is_empty_result());

    let mut phrase = PhraseQuery::new();
    phrase.execute(&index, None).unwrap();
    assert!(phrase.matched_docs().is_empty());
    assert_eq!(phrase.score(DocId(0), &index).unwrap(), 0.0);
}

#[test]
fn test_optimize_is_idempotent() {
    let index = body_index(&["ran fast", "quick fox"]);
    let queries: Vec<Query> = vec![
        body_phrase(&["quick", "fox"]).into(),
        body_phrase(&["fox"]).into(),
        body_phrase(&["quick", "cat"]).into(),
        PhraseQuery::from_words(&["run", "ran", "fast"], Some(&[0, 0, 1]), Some("body"))
            .unwrap()
            .into(),
        PhraseQuery::from_words(&["run", "ran"], Some(&[0, 0]), Some("body"))
            .unwrap()
            .into(),
    ];
    for query in queries {
        let once = query.optimize(&index).unwrap();
        let twice = once.clone().optimize(&index).unwrap();
        assert_eq!(once, twice, "optimize not idempotent for {once}");
    }
}

#[test]
fn test_rewrite_then_optimize_drops_missing_fields() {
    let index = titled_index(&[("quick fox", "lazy dog")]);
    let phrase = PhraseQuery::from_words(&["quick", "fox"], None, None).unwrap();
    let prepared = phrasematch::Searcher::new(&index)
        .prepare(phrase.into())
        .unwrap();
    // Only the title copy survives, so the disjunction collapses.
    match prepared {
        Query::Phrase(p) => assert_eq!(p.field(), Some("title")),
        other => panic!("expected phrase, got {other}"),
    }
}

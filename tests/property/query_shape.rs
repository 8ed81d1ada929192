//! Structural properties of construction and optimize.

use phrasematch::{MemoryIndex, PhraseQuery, Query, Term};
use proptest::prelude::*;

const VOCAB: &[&str] = &["a", "b", "c", "d", "e"];

/// Documents only use part of the vocabulary, so some phrase words are absent.
const DOC_VOCAB: &[&str] = &["a", "b", "c"];

fn term_count(query: &Query) -> usize {
    match query {
        Query::Phrase(q) => q.terms().len(),
        Query::Term(_) => 1,
        Query::MultiTerm(q) => q.terms().len(),
        Query::Disjunction(q) => q.clauses().iter().map(term_count).sum(),
        Query::Empty => 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: terms and offsets stay aligned whatever appends succeed or fail.
    #[test]
    fn prop_terms_offsets_aligned(
        appends in prop::collection::vec(
            (prop::sample::select(VOCAB), prop::option::of(0u32..4), any::<bool>()),
            0..12,
        ),
        slop in 0u32..2,
    ) {
        let mut phrase = PhraseQuery::new();
        let _ = phrase.set_slop(slop);
        for (word, offset, other_field) in appends {
            let field = if other_field { "title" } else { "body" };
            let _ = phrase.add_term(Term::new(field, word), offset);
            prop_assert_eq!(phrase.terms().len(), phrase.offsets().len());
        }
        if phrase.slop() > 0 {
            prop_assert!(!phrase.has_alternates());
        }
    }

    /// Property: optimize never adds terms and is idempotent.
    #[test]
    fn prop_optimize_prunes_only(
        docs in prop::collection::vec(prop::collection::vec(prop::sample::select(DOC_VOCAB), 1..8), 1..4),
        pattern in prop::collection::vec((prop::sample::select(VOCAB), 0u32..3), 0..5),
    ) {
        let texts: Vec<String> = docs.iter().map(|d| d.join(" ")).collect();
        let index = MemoryIndex::from_texts("body", &texts);
        let words: Vec<&str> = pattern.iter().map(|(w, _)| *w).collect();
        let offsets: Vec<u32> = pattern.iter().map(|(_, o)| *o).collect();
        let phrase = PhraseQuery::from_words(&words, Some(&offsets), Some("body")).unwrap();

        let before = phrase.terms().len();
        let once = Query::Phrase(phrase).optimize(&index).unwrap();
        prop_assert!(term_count(&once) <= before);

        let twice = once.clone().optimize(&index).unwrap();
        prop_assert_eq!(once, twice);
    }
}

//! Matchers against brute force.

use crate::common::*;
use phrasematch::{ClassicSimilarity, DocId, MemoryIndex, PhraseQuery, Searcher, SearchOptions};
use proptest::prelude::*;

const VOCAB: &[&str] = &["a", "b", "c", "d"];

// ============================================================================
// STRATEGIES
// ============================================================================

fn doc_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..24)
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(doc_strategy(), 1..6)
}

/// Words with offsets that may repeat (alternates) or skip (gaps). A word
/// appears at most once per offset.
fn pattern_strategy() -> impl Strategy<Value = Vec<(&'static str, u32)>> {
    prop::collection::vec((prop::sample::select(VOCAB), 0u32..4), 1..5).prop_map(|pattern| {
        let mut seen = std::collections::HashSet::new();
        pattern.into_iter().filter(|pair| seen.insert(*pair)).collect()
    })
}

fn index_of(corpus: &[Vec<&str>]) -> MemoryIndex {
    let texts: Vec<String> = corpus.iter().map(|doc| doc.join(" ")).collect();
    MemoryIndex::from_texts("body", &texts)
}

fn phrase_of(pattern: &[(&str, u32)]) -> PhraseQuery {
    let words: Vec<&str> = pattern.iter().map(|(w, _)| *w).collect();
    let offsets: Vec<u32> = pattern.iter().map(|(_, o)| *o).collect();
    PhraseQuery::from_words(&words, Some(&offsets), Some("body")).unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: exact frequency equals the number of aligned starts.
    #[test]
    fn prop_exact_matches_oracle(corpus in corpus_strategy(), pattern in pattern_strategy()) {
        let index = index_of(&corpus);
        let mut phrase = phrase_of(&pattern);
        phrase.execute(&index, None).unwrap();

        let words: Vec<&str> = pattern.iter().map(|(w, _)| *w).collect();
        let offsets: Vec<u32> = pattern.iter().map(|(_, o)| *o).collect();
        for (i, doc) in corpus.iter().enumerate() {
            let expected = naive_exact_freq(doc, &words, &offsets);
            let actual = phrase.phrase_freq(DocId(i as u32), &ClassicSimilarity);
            prop_assert_eq!(actual, expected as f32, "doc {} = {:?}", i, doc);
        }
    }

    /// Property: every document with a non-zero exact frequency is a candidate.
    #[test]
    fn prop_matches_are_candidates(corpus in corpus_strategy(), pattern in pattern_strategy()) {
        let index = index_of(&corpus);
        let mut phrase = phrase_of(&pattern);
        phrase.execute(&index, None).unwrap();
        for i in 0..corpus.len() {
            let doc = DocId(i as u32);
            if phrase.phrase_freq(doc, &ClassicSimilarity) > 0.0 {
                prop_assert!(phrase.matched_docs().contains(&doc));
            }
        }
    }

    /// Property: sloppy frequency never drops as slop grows, and never falls
    /// below the exact count.
    #[test]
    fn prop_sloppy_monotone_in_slop(
        corpus in corpus_strategy(),
        words in prop::collection::vec(prop::sample::select(VOCAB), 2..4),
    ) {
        let index = index_of(&corpus);
        let mut previous: Option<Vec<f32>> = None;
        for slop in 0..4u32 {
            let mut phrase = PhraseQuery::from_words(&words, None, Some("body"))
                .unwrap()
                .with_slop(slop)
                .unwrap();
            phrase.execute(&index, None).unwrap();
            let freqs: Vec<f32> = (0..corpus.len())
                .map(|i| phrase.phrase_freq(DocId(i as u32), &ClassicSimilarity))
                .collect();
            if let Some(previous) = &previous {
                for (before, now) in previous.iter().zip(&freqs) {
                    prop_assert!(now + 1e-5 >= *before, "slop {}: {} < {}", slop, now, before);
                }
            }
            previous = Some(freqs);
        }
    }

    /// Property: hits are ranked, positive, within the limit, and candidates.
    #[test]
    fn prop_search_results_well_formed(
        corpus in corpus_strategy(),
        words in prop::collection::vec(prop::sample::select(VOCAB), 1..4),
        slop in 0u32..3,
        limit in 1usize..8,
    ) {
        let index = index_of(&corpus);
        let phrase = PhraseQuery::from_words(&words, None, Some("body"))
            .unwrap()
            .with_slop(slop)
            .unwrap();
        let options = SearchOptions { limit, ..SearchOptions::default() };
        let hits = Searcher::new(&index).search(phrase.into(), &options).unwrap();

        prop_assert!(hits.len() <= limit);
        assert_ranked(&hits);
        for hit in &hits {
            prop_assert!(hit.score > 0.0);
            prop_assert!((hit.doc.get() as usize) < corpus.len());
        }
    }
}

//! Shared test utilities and fixtures.

#![allow(dead_code)]

use phrasematch::{DocId, IndexReader, Query, SearchHit, SearchOptions, Searcher};

// Re-export canonical test utilities from phrasematch::testing
pub use phrasematch::testing::{
    body_index, body_phrase, naive_exact_freq, titled_index, CountingReader, FailingReader,
    StorageFailure,
};

/// Run `query` with no limit and return the hits in rank order.
pub fn search<R: IndexReader>(reader: &R, query: impl Into<Query>) -> Vec<SearchHit> {
    let options = SearchOptions {
        limit: usize::MAX,
        ..SearchOptions::default()
    };
    Searcher::new(reader)
        .search(query.into(), &options)
        .expect("search should succeed")
}

/// Hit doc ids in rank order.
pub fn hit_docs<R: IndexReader>(reader: &R, query: impl Into<Query>) -> Vec<DocId> {
    search(reader, query).into_iter().map(|h| h.doc).collect()
}

/// Rewrite, optimize and execute `query`, then score `doc`.
pub fn score_of<R: IndexReader>(reader: &R, query: impl Into<Query>, doc: DocId) -> f32 {
    let mut query = Searcher::new(reader)
        .prepare(query.into())
        .expect("prepare should succeed");
    query.execute(reader, None).expect("execute should succeed");
    query.score(doc, reader).expect("score should succeed")
}

/// Hits are ranked score descending, doc ascending on ties.
pub fn assert_ranked(hits: &[SearchHit]) {
    for pair in hits.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].doc < pair[1].doc),
            "hits out of order: {:?}",
            pair
        );
    }
}

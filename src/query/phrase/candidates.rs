//! Candidate set construction.
//!
//! A document can only contain the phrase if every slot of the pattern is
//! filled by at least one of its alternates. So: union the alternates' postings
//! per offset, then intersect the per-offset sets, smallest first.
//!
//! Positions for every term are fetched here, once, and handed back alongside
//! the candidates. Nothing downstream asks the reader for postings again.

use crate::contracts::check_docs_ascending;
use crate::index::IndexReader;
use crate::types::{DocFilter, DocId, MatchedDocs, PositionCache, Term};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) struct Candidates {
    pub docs: MatchedDocs,
    pub positions: PositionCache,
}

/// Intersect per-offset postings unions, restricted to `filter` if given.
///
/// `groups` maps each offset to the indices of its terms in `terms`.
pub(crate) fn build_candidates<R: IndexReader>(
    terms: &[Term],
    groups: &BTreeMap<u32, Vec<usize>>,
    reader: &R,
    filter: Option<&DocFilter>,
) -> Result<Candidates, R::Error> {
    let mut positions = PositionCache::with_capacity(terms.len());
    let mut sets: Vec<Cow<'_, BTreeSet<DocId>>> = Vec::with_capacity(groups.len() + 1);

    for indices in groups.values() {
        let mut union = BTreeSet::new();
        for &i in indices {
            let term = &terms[i];
            let docs = reader.term_docs(term)?;
            check_docs_ascending(&docs);
            union.extend(docs);

            if !positions.contains_key(term) {
                positions.insert(term.clone(), reader.term_positions(term)?);
            }
        }
        sets.push(Cow::Owned(union));
    }

    if let Some(filter) = filter {
        sets.push(Cow::Borrowed(filter));
    }

    // Cheapest intersection first. Stable, so ties keep offset order.
    sets.sort_by_key(|set| set.len());

    let mut sets = sets.into_iter();
    let mut docs: MatchedDocs = sets.next().map(Cow::into_owned).unwrap_or_default();
    for set in sets {
        if docs.is_empty() {
            break;
        }
        docs.retain(|doc| set.contains(doc));
    }

    tracing::trace!(
        groups = groups.len(),
        terms = positions.len(),
        candidates = docs.len(),
        "intersected offset groups"
    );

    Ok(Candidates { docs, positions })
}

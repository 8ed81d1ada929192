// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact phrase matching (slop 0) with alternates.
//!
//! Pick the slot with the fewest positions in this document as the pivot.
//! Each pivot position fixes where every other slot must be; a hypothesis
//! survives only if, for every other slot, some alternate sits exactly there.
//!
//! ```text
//! pattern:   quick@0  fox@1            pivot = quick (2 positions)
//! doc:       quick=[0,5]  fox=[1,6]
//! check:     0 → fox at 1 ✓   5 → fox at 6 ✓    freq = 2
//! ```

use crate::types::{DocId, PositionCache, Term};
use std::collections::BTreeMap;

/// Number of aligned occurrences of the pattern in `doc`.
///
/// Every position of every pivot alternate is its own hypothesis, so a
/// position held by two pivot alternates counts once per alternate.
/// Returns 0 when any slot has no alternate present in `doc`.
pub fn exact_phrase_freq(
    terms: &[Term],
    offsets: &[u32],
    positions: &PositionCache,
    doc: DocId,
) -> u32 {
    // Per offset: the position lists of alternates actually present in `doc`.
    let mut slots: BTreeMap<u32, Vec<&[u32]>> = BTreeMap::new();
    for (term, &offset) in terms.iter().zip(offsets) {
        let slot = slots.entry(offset).or_default();
        if let Some(list) = positions.get(term).and_then(|p| p.get(&doc)) {
            if !list.is_empty() {
                slot.push(list.as_slice());
            }
        }
    }

    if slots.is_empty() || slots.values().any(Vec::is_empty) {
        return 0;
    }

    let Some((&pivot_offset, pivot_lists)) = slots
        .iter()
        .min_by_key(|(_, lists)| lists.iter().map(|list| list.len()).sum::<usize>())
    else {
        return 0;
    };

    let starts = pivot_lists.iter().flat_map(|list| list.iter().copied());

    let mut freq = 0;
    'hypothesis: for start in starts {
        for (&offset, lists) in &slots {
            if offset == pivot_offset {
                continue;
            }
            let expected = i64::from(start) + i64::from(offset) - i64::from(pivot_offset);
            let Ok(expected) = u32::try_from(expected) else {
                continue 'hypothesis;
            };
            if !lists.iter().any(|list| list.binary_search(&expected).is_ok()) {
                continue 'hypothesis;
            }
        }
        freq += 1;
    }

    freq
}

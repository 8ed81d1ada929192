// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sloppy phrase matching (slop > 0).
//!
//! A phrase instance picks one real position for every term. Its distance is
//! how far the instance is from a perfectly aligned phrase:
//!
//! ```text
//! distance = min over start of  Σ | position_i - offset_i - start |
//! ```
//!
//! `start` is searched over `anchor - slop ..= anchor + slop`, where `anchor`
//! is where the first term says the phrase begins. The distance is convex in
//! `start`, so the minimum sits at the median implied start clamped to that
//! window and no shift needs to be tried one by one. Every instance whose
//! distance is within slop adds `similarity.sloppy_freq(distance)`.
//!
//! Instances are enumerated depth-first over terms in phrase order. A branch
//! stops as soon as two adjacent terms alone already drift further apart than
//! slop: such an instance can never come back under budget, since the total
//! distance is at least that pairwise drift. This prunes without changing which
//! instances contribute.
//!
//! Alternates are not handled here; a phrase with alternates cannot have slop.

use crate::scoring::Similarity;
use crate::types::{DocId, PositionCache, Term};

/// Sum of `sloppy_freq(distance)` over all instances of the pattern in `doc`
/// within `slop`. Zero if any term is absent from `doc`.
pub fn sloppy_phrase_freq(
    terms: &[Term],
    offsets: &[u32],
    positions: &PositionCache,
    doc: DocId,
    slop: u32,
    similarity: &dyn Similarity,
) -> f32 {
    let mut lists: Vec<&[u32]> = Vec::with_capacity(terms.len());
    for term in terms {
        match positions.get(term).and_then(|p| p.get(&doc)) {
            Some(list) if !list.is_empty() => lists.push(list),
            _ => return 0.0,
        }
    }
    if lists.is_empty() {
        return 0.0;
    }

    let mut freq = 0.0;
    let mut instance = Vec::with_capacity(lists.len());
    expand(&lists, offsets, slop, &mut instance, &mut |instance| {
        if let Some(distance) = min_deviation(instance, offsets, slop) {
            freq += similarity.sloppy_freq(distance);
        }
    });
    freq
}

/// Extend `instance` with every admissible position of the next term.
fn expand(
    lists: &[&[u32]],
    offsets: &[u32],
    slop: u32,
    instance: &mut Vec<u32>,
    visit: &mut dyn FnMut(&[u32]),
) {
    let depth = instance.len();
    if depth == lists.len() {
        visit(instance);
        return;
    }

    for &position in lists[depth] {
        if let Some(&previous) = instance.last() {
            let drift = (i64::from(position) - i64::from(previous))
                - (i64::from(offsets[depth]) - i64::from(offsets[depth - 1]));
            if drift.unsigned_abs() > u64::from(slop) {
                continue;
            }
        }
        instance.push(position);
        expand(lists, offsets, slop, instance, visit);
        instance.pop();
    }
}

/// Minimal total deviation of `instance` from an aligned phrase, or `None` if
/// it exceeds `slop`.
///
/// `instance[i]` is the document position chosen for the term at `offsets[i]`.
pub fn min_deviation(instance: &[u32], offsets: &[u32], slop: u32) -> Option<u32> {
    let mut implied: Vec<i64> = instance
        .iter()
        .zip(offsets)
        .map(|(&position, &offset)| i64::from(position) - i64::from(offset))
        .collect();
    let &anchor = implied.first()?;
    let slop = i64::from(slop);

    // Distance is convex in `start` and bottoms out at a median of the implied
    // starts, so the best start in the window is that median clamped to it.
    implied.sort_unstable();
    let median = implied[implied.len() / 2];
    let start = median.clamp(anchor - slop, anchor + slop);

    let mut distance = 0i64;
    for &implied_start in &implied {
        distance += (implied_start - start).abs();
        if distance > slop {
            return None;
        }
    }
    u32::try_from(distance).ok()
}

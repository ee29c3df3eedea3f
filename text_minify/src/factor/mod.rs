// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hoisting shared heritable properties into enclosing arrays.
//!
//! The leaves of a minified component are first annotated with property ranges: maximal runs of
//! leaves over which a single `key: value` pair could be declared once at the head of an array
//! instead of on every leaf. Ranges that cross each other are split (the most costly range wins),
//! ranges that would save nothing are dropped, and the surviving ranges are turned into nested
//! arrays.

mod output;
mod ranges;
mod split;


use alloc::vec::Vec;

use text_component::Component;

use crate::{Leaf, StyleConfig};

use ranges::PropertyRanges;

/// Factors the shared properties of already reduced and merged `leaves` into nested arrays.
///
/// The returned elements form the root array, whose first element has not been guarded against
/// passing its style on to the rest.
pub(crate) fn factor(leaves: Vec<Leaf>, config: &StyleConfig) -> Vec<Component> {
    let mut ranges = PropertyRanges::build(leaves, config);
    log::trace!("built {} property ranges", ranges.ranges.len());

    ranges.split_straddling();
    let kept = ranges.prune();
    log::trace!(
        "{} of {} property ranges kept after splitting",
        kept,
        ranges.ranges.len()
    );

    output::reconstruct(ranges, config)
}

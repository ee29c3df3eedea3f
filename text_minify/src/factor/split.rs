// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use super::ranges::{Node, PropertyRange, PropertyRanges, RangeId};

impl PropertyRanges {
    /// Splits ranges so that no two ranges straddle each other, favouring costly ranges.
    ///
    /// Repeatedly takes the most costly range not yet settled and splits every other unsettled
    /// range that crosses one of its boundaries at that boundary. The far piece of each split is
    /// itself unsettled. This is greedy and makes no attempt at an optimal packing.
    pub(crate) fn split_straddling(&mut self) {
        let mut tentative: Vec<RangeId> = (0..self.ranges.len()).collect();
        while let Some(position) = self.most_costly(&tentative) {
            let greatest = tentative.remove(position);
            let (start, end) = (self.ranges[greatest].start, self.ranges[greatest].end);

            let mut start_straddlers: SmallVec<[RangeId; 4]> = SmallVec::new();
            let mut end_straddlers: SmallVec<[RangeId; 4]> = SmallVec::new();
            for &id in &tentative {
                let range = &self.ranges[id];
                if range.start < start {
                    if range.end > start && range.end < end {
                        start_straddlers.push(id);
                    }
                } else if range.start < end && range.end > end {
                    end_straddlers.push(id);
                }
            }

            for id in start_straddlers {
                let at = self.ranges[greatest].start;
                tentative.push(self.split(id, at));
            }
            for id in end_straddlers {
                let at = self.ranges[greatest].end;
                tentative.push(self.split(id, at));
            }
        }
    }

    /// Returns the position in `tentative` of the first range with the greatest cost.
    fn most_costly(&self, tentative: &[RangeId]) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (position, &id) in tentative.iter().enumerate() {
            let cost = self.ranges[id].cost();
            if best.is_none_or(|(_, best_cost)| cost > best_cost) {
                best = Some((position, cost));
            }
        }
        best.map(|(position, _)| position)
    }

    /// Splits range `id` around the marker at node index `at`, which it strictly contains.
    ///
    /// The left piece keeps `id` and now ends just before the marker. The right piece starts just
    /// after it and is returned.
    pub(crate) fn split(&mut self, id: RangeId, at: usize) -> RangeId {
        // Two markers are inserted: one at `at` and one just after the marker now at `at + 1`.
        let shift = |index: usize| match index {
            index if index < at => index,
            index if index == at => at + 1,
            index => index + 2,
        };
        for range in &mut self.ranges {
            range.start = shift(range.start);
            range.end = shift(range.end);
            for occurrence in &mut range.occurrences {
                *occurrence = shift(*occurrence);
            }
        }

        let right = self.ranges.len();
        self.nodes.insert(at, Node::End(id));
        self.nodes.insert(at + 2, Node::Start(right));

        let left = &mut self.ranges[id];
        let old_end = left.end;
        let occurrences = left
            .occurrences
            .iter()
            .copied()
            .filter(|&occurrence| occurrence > at + 2)
            .collect();
        left.occurrences.retain(|occurrence| *occurrence < at);
        left.end = at;
        let right_range = PropertyRange {
            key: left.key.clone(),
            value: left.value.clone(),
            identity: left.identity.clone(),
            size: left.size,
            occurrences,
            start: at + 2,
            end: old_end,
        };
        self.nodes[old_end] = Node::End(right);
        self.ranges.push(right_range);
        right
    }
}

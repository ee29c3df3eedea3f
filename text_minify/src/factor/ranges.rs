// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use text_component::Value;

use crate::config::property_identity;
use crate::inherit::is_affected_by_inheriting;
use crate::{Leaf, StyleConfig};

/// Index of a [`PropertyRange`] in [`PropertyRanges::ranges`].
pub(crate) type RangeId = usize;

/// A run of consecutive leaves over which one heritable property could be declared once.
///
/// Every leaf between the range's markers either sets the property's key explicitly (with any
/// value) or renders the same whether or not it inherits the property.
#[derive(Clone, Debug)]
pub(crate) struct PropertyRange {
    pub(crate) key: String,
    pub(crate) value: Value,
    /// Canonical `"key":value` encoding, equal for equal properties.
    pub(crate) identity: String,
    /// Encoded size of a single instance of the property.
    pub(crate) size: usize,
    /// Node indices of the leaves that set exactly this property, in order.
    pub(crate) occurrences: SmallVec<[usize; 4]>,
    /// Node index of the [`Node::Start`] marker.
    pub(crate) start: usize,
    /// Node index of the [`Node::End`] marker.
    pub(crate) end: usize,
}

impl PropertyRange {
    /// Bytes spent on this property across all of its occurrences.
    #[inline]
    pub(crate) fn cost(&self) -> usize {
        self.occurrences.len() * self.size
    }
}

/// A leaf, or a boundary of a property range.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
    Leaf(Leaf),
    Start(RangeId),
    End(RangeId),
}

/// Leaves interleaved with the markers of every property range over them.
#[derive(Clone, Debug)]
pub(crate) struct PropertyRanges {
    pub(crate) nodes: Vec<Node>,
    pub(crate) ranges: Vec<PropertyRange>,
}

impl PropertyRanges {
    /// Scans `leaves` left to right, opening a range for every heritable property a leaf sets
    /// and closing it before the first leaf that inheriting it would change.
    pub(crate) fn build(leaves: Vec<Leaf>, config: &StyleConfig) -> Self {
        let mut nodes = Vec::with_capacity(leaves.len() * 2);
        let mut ranges: Vec<PropertyRange> = Vec::new();
        // Ranges without an end marker yet, by property identity and in opening order.
        let mut open: HashMap<String, RangeId> = HashMap::new();
        let mut open_order: Vec<RangeId> = Vec::new();

        for leaf in leaves {
            let closing: SmallVec<[RangeId; 8]> = open_order
                .iter()
                .rev()
                .copied()
                .filter(|&id| {
                    is_affected_by_inheriting(&leaf, &[ranges[id].key.as_str()], config)
                })
                .collect();
            for &id in &closing {
                ranges[id].end = nodes.len();
                nodes.push(Node::End(id));
                open.remove(&ranges[id].identity);
            }
            open_order.retain(|id| !closing.contains(id));

            let mut carried: SmallVec<[RangeId; 8]> = SmallVec::new();
            if let Leaf::Styled(object) = &leaf {
                for (key, value) in object.properties.iter() {
                    if !config.is_heritable(key) {
                        continue;
                    }
                    let identity = property_identity(key, value);
                    let id = match open.get(&identity) {
                        Some(&id) => id,
                        None => {
                            let id = ranges.len();
                            ranges.push(PropertyRange {
                                key: key.into(),
                                value: value.clone(),
                                identity: identity.clone(),
                                size: config.property_size(key, value),
                                occurrences: SmallVec::new(),
                                start: nodes.len(),
                                end: usize::MAX,
                            });
                            nodes.push(Node::Start(id));
                            open.insert(identity, id);
                            open_order.push(id);
                            id
                        }
                    };
                    carried.push(id);
                }
            }
            for id in carried {
                ranges[id].occurrences.push(nodes.len());
            }
            nodes.push(Node::Leaf(leaf));
        }

        for &id in open_order.iter().rev() {
            ranges[id].end = nodes.len();
            nodes.push(Node::End(id));
        }

        Self { nodes, ranges }
    }

    /// Drops the markers of every range with at most one occurrence, since declaring such a
    /// property on an enclosing array saves nothing.
    ///
    /// Returns the number of ranges that remain.
    pub(crate) fn prune(&mut self) -> usize {
        let keep: Vec<bool> = self
            .ranges
            .iter()
            .map(|range| range.occurrences.len() > 1)
            .collect();
        let mut remap = vec![0; self.nodes.len()];
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, node) in core::mem::take(&mut self.nodes).into_iter().enumerate() {
            remap[index] = nodes.len();
            match node {
                Node::Start(id) | Node::End(id) if !keep[id] => {}
                node => nodes.push(node),
            }
        }
        self.nodes = nodes;

        let mut kept = 0;
        for (range, _) in self.ranges.iter_mut().zip(&keep).filter(|&(_, &keep)| keep) {
            range.start = remap[range.start];
            range.end = remap[range.end];
            for occurrence in &mut range.occurrences {
                *occurrence = remap[*occurrence];
            }
            kept += 1;
        }
        kept
    }
}

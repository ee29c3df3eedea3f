// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;
use text_component::{Component, StyledObject};

use super::ranges::{Node, PropertyRange, PropertyRanges, RangeId};
use crate::inherit::is_affected_by_inheriting;
use crate::merge::Merge;
use crate::reduce::Reduce;
use crate::{Flatten, Leaf, StyleConfig};

/// Builds nested arrays from properly nested ranges.
///
/// Every range becomes an array headed by an empty-text object carrying the range's property,
/// and the leaves inside it drop that property when they would only repeat it.
pub(crate) fn reconstruct(ranges: PropertyRanges, config: &StyleConfig) -> Vec<Component> {
    let PropertyRanges { nodes, ranges } = ranges;
    let mut output = Output {
        config,
        ranges: &ranges,
        arrays: vec![Vec::new()],
        ancestors: Vec::new(),
        simultaneous: Vec::new(),
        run: Vec::new(),
    };

    let mut nodes = nodes.into_iter().peekable();
    while let Some(node) = nodes.next() {
        match node {
            Node::Leaf(leaf) => output.push_leaf(leaf),
            Node::Start(id) => {
                output.flush_run();
                let mut head = StyledObject::from_text("");
                head.properties
                    .insert(ranges[id].key.as_str(), ranges[id].value.clone());
                output.ancestors.push(id);

                // Ranges that start here and end where this one ends share its array.
                let mut count = 1;
                let mut previous = id;
                while let Some(&Node::Start(next)) = nodes.peek() {
                    if ranges[next].end + 1 != ranges[previous].end {
                        break;
                    }
                    nodes.next();
                    head.properties
                        .insert(ranges[next].key.as_str(), ranges[next].value.clone());
                    output.ancestors.push(next);
                    count += 1;
                    previous = next;
                }
                output.simultaneous.push(count);
                output.arrays.push(vec![head.into()]);
            }
            Node::End(_) => {
                output.flush_run();
                let count = output.simultaneous.pop().unwrap_or(1);
                for _ in 1..count {
                    nodes.next();
                }
                let len = output.ancestors.len().saturating_sub(count);
                output.ancestors.truncate(len);
                output.close_array();
            }
        }
    }

    output.flush_run();
    while output.arrays.len() > 1 {
        output.close_array();
    }
    output.arrays.pop().unwrap_or_default()
}

struct Output<'a> {
    config: &'a StyleConfig,
    ranges: &'a [PropertyRange],
    /// Arrays under construction, outermost first. The first is the root.
    arrays: Vec<Vec<Component>>,
    /// Ranges enclosing the current position, outermost first.
    ancestors: Vec<RangeId>,
    /// How many of `ancestors` each open array declares.
    simultaneous: Vec<usize>,
    /// Leaves waiting to be reduced and merged into the innermost array.
    run: Vec<Leaf>,
}

impl Output<'_> {
    fn push_leaf(&mut self, mut leaf: Leaf) {
        if let Leaf::Styled(object) = &mut leaf {
            self.strip_inherited(object);
        }
        self.run.push(leaf);
    }

    /// Removes properties the object would inherit anyway from the innermost range of each key.
    fn strip_inherited(&self, object: &mut StyledObject) {
        let mut seen: SmallVec<[&str; 8]> = SmallVec::new();
        for &id in self.ancestors.iter().rev() {
            let range = &self.ranges[id];
            if seen.contains(&range.key.as_str()) {
                continue;
            }
            seen.push(range.key.as_str());
            if object.properties.get(&range.key) == Some(&range.value) {
                object.properties.remove(&range.key);
            }
        }
    }

    fn flush_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let leaves = Merge::new(Reduce::new(self.run.drain(..), self.config), self.config);
        if let Some(array) = self.arrays.last_mut() {
            array.extend(leaves.map(Component::from));
        }
    }

    fn close_array(&mut self) {
        if self.arrays.len() < 2 {
            return;
        }
        let Some(mut items) = self.arrays.pop() else {
            return;
        };
        fold_head(&mut items, self.config);
        let component = match items.len() {
            1 => items.swap_remove(0),
            _ => Component::Sequence(items),
        };
        if let Some(parent) = self.arrays.last_mut() {
            parent.push(component);
        }
    }
}

/// Folds an array's empty-text head into the element after it, when that renders the same.
///
/// Bare text takes the head's properties. An object takes them if it sets none of the same keys
/// and its own heritable properties would not change any later element of the array. Nested
/// arrays are left alone.
fn fold_head(items: &mut Vec<Component>, config: &StyleConfig) {
    let [Component::Object(head), first, rest @ ..] = items.as_slice() else {
        return;
    };
    if !head.has_empty_text() {
        return;
    }
    let folded = match first {
        Component::Primitive(text) => StyledObject {
            text: Some(text.clone()),
            ..head.clone()
        },
        Component::Object(object) => {
            let keys: SmallVec<[&str; 8]> = object
                .properties
                .keys()
                .filter(|key| config.is_heritable(key))
                .collect();
            if keys.iter().any(|key| head.properties.contains_key(key)) {
                return;
            }
            let leaks = rest.iter().any(|sibling| {
                Flatten::new(sibling, config)
                    .any(|leaf| is_affected_by_inheriting(&leaf, &keys, config))
            });
            if leaks {
                return;
            }
            let mut folded = object.clone();
            for (key, value) in head.properties.iter() {
                folded.properties.insert(key, value.clone());
            }
            folded
        }
        Component::Sequence(_) => return,
    };
    items[1] = Component::Object(folded);
    items.remove(0);
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;
use text_component::Component;

use crate::flatten::exposed_style;
use crate::inherit::is_affected_by_inheriting;
use crate::{Flatten, StyleConfig};

/// Prepends an empty string to `items` if the rest would otherwise inherit a style from the
/// first element that changes how they render.
pub(crate) fn disable_inheritance_if_necessary(
    mut items: Vec<Component>,
    config: &StyleConfig,
) -> Vec<Component> {
    let [first, rest @ ..] = items.as_slice() else {
        return items;
    };
    let exposed = exposed_style(first, config);
    let keys: SmallVec<[&str; 8]> = exposed.keys().collect();
    if keys.is_empty() {
        return items;
    }
    let leaks = rest.iter().any(|sibling| {
        Flatten::new(sibling, config).any(|leaf| is_affected_by_inheriting(&leaf, &keys, config))
    });
    if leaks {
        log::debug!("first element would style its siblings, inserting an empty string");
        items.insert(0, Component::empty());
    }
    items
}

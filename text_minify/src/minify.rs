// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::iter;

use text_component::{Component, Error, Properties, StyledObject, Value};

use crate::factor::factor;
use crate::guard::disable_inheritance_if_necessary;
use crate::merge::Merge;
use crate::reduce::Reduce;
use crate::{Flatten, Leaf, StyleConfig};

/// Returns a component that renders exactly like `component` and is usually much smaller.
///
/// This never fails and always produces the same output for the same input and configuration.
/// Minifying the output again yields a component that still renders the same.
pub fn minify(component: &Component, config: &StyleConfig) -> Component {
    let mut leaves: Vec<Leaf> = Merge::new(
        Reduce::new(Flatten::new(component, config), config),
        config,
    )
    .collect();
    log::trace!("{} leaves after reducing and merging", leaves.len());

    if leaves.len() < 2 {
        return leaves.pop().map(Component::from).unwrap_or_default();
    }

    let mut items = factor(leaves, config);
    if items.len() < 2 {
        return items.pop().unwrap_or_default();
    }
    Component::Sequence(disable_inheritance_if_necessary(items, config))
}

/// Parses `value` as a component, minifies it, and returns the result as JSON.
///
/// # Errors
///
/// Returns an [`Error`] if `value` is not a well-formed component.
pub fn minify_json(value: Value, config: &StyleConfig) -> Result<Value, Error> {
    let component = Component::try_from(value)?;
    Ok(minify(&component, config).into())
}

/// Returns `component` as a flat array of leaves that each carry their full style.
///
/// The array starts with an empty string so that the first leaf does not style the others. This
/// is the form minification starts from, and renders exactly like `component`.
pub fn flatten(component: &Component, config: &StyleConfig) -> Component {
    Component::Sequence(
        iter::once(Component::empty())
            .chain(Flatten::new(component, config).map(Component::from))
            .collect(),
    )
}

/// Applies `properties` to every part of `component` that does not override them, then
/// minifies the result.
///
/// ```
/// use serde_json::json;
/// use text_component::{Component, Properties};
/// use text_minify::{with_default_style, StyleConfig};
///
/// let config = StyleConfig::new().heritable("color");
/// let component = Component::try_from(json!(["a", {"text": "b", "color": "blue"}])).unwrap();
/// let properties: Properties = [("color", "gray")].into_iter().collect();
///
/// let styled = with_default_style(properties, &component, &config);
/// assert_eq!(
///     styled.to_json_string(),
///     r#"[{"text":"a","color":"gray"},{"text":"b","color":"blue"}]"#
/// );
/// ```
pub fn with_default_style(
    properties: Properties,
    component: &Component,
    config: &StyleConfig,
) -> Component {
    let wrapper = StyledObject::from_text("")
        .with_properties(properties)
        .with_children(vec![component.clone()]);
    minify(&Component::Object(wrapper), config)
}

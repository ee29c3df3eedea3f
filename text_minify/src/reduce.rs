// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_component::StyledObject;

use crate::inherit::TextClass;
use crate::{minify, Leaf, StyleConfig};

/// Simplifies each leaf on its own.
///
/// - Leaves with empty text are dropped.
/// - Whitespace loses every heritable property that is invisible on whitespace.
/// - A leaf whose properties no longer change its rendering becomes bare text.
/// - The template arguments of a textless object are minified.
#[derive(Clone, Debug)]
pub(crate) struct Reduce<'c, I> {
    inner: I,
    config: &'c StyleConfig,
}

impl<'c, I: Iterator<Item = Leaf>> Reduce<'c, I> {
    pub(crate) fn new(inner: I, config: &'c StyleConfig) -> Self {
        Self { inner, config }
    }
}

impl<I: Iterator<Item = Leaf>> Iterator for Reduce<'_, I> {
    type Item = Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.inner.next()?;
            if let Some(leaf) = reduce_leaf(leaf, self.config) {
                return Some(leaf);
            }
        }
    }
}

fn reduce_leaf(leaf: Leaf, config: &StyleConfig) -> Option<Leaf> {
    let mut object = match leaf {
        Leaf::Text(text) if text.is_empty() => return None,
        Leaf::Text(text) => return Some(Leaf::Text(text)),
        Leaf::Styled(object) => object,
    };

    let Some(text) = object.text.take() else {
        if let Some(args) = object.template_args.as_mut() {
            for arg in args.iter_mut() {
                *arg = minify(arg, config);
            }
        }
        return Some(Leaf::Styled(object));
    };
    if text.is_empty() {
        return None;
    }

    let class = TextClass::of_primitive(&text);
    if class.is_whitespace() {
        object
            .properties
            .retain(|key, _| !config.is_heritable(key) || config.affects_whitespace(key));
    }
    if class == TextClass::LineBreaks || is_bare(&object) {
        return Some(Leaf::Text(text));
    }
    object.text = Some(text);
    Some(Leaf::Styled(object))
}

fn is_bare(object: &StyledObject) -> bool {
    object.properties.is_empty() && object.template_args.is_none()
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;
use text_component::{Primitive, StyledObject};

use crate::inherit::{text_is_affected, TextClass};
use crate::{Leaf, StyleConfig};

/// Fuses adjacent leaves that render the same as their concatenation.
#[derive(Clone, Debug)]
pub(crate) struct Merge<'c, I> {
    inner: I,
    config: &'c StyleConfig,
    pending: Option<Leaf>,
}

impl<'c, I: Iterator<Item = Leaf>> Merge<'c, I> {
    pub(crate) fn new(inner: I, config: &'c StyleConfig) -> Self {
        Self {
            inner,
            config,
            pending: None,
        }
    }
}

impl<I: Iterator<Item = Leaf>> Iterator for Merge<'_, I> {
    type Item = Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        let mut leaf = self.pending.take().or_else(|| self.inner.next())?;

        loop {
            match self.inner.next() {
                None => break,
                Some(next) => match fuse(leaf, next, self.config) {
                    Fused::Merged(merged) => leaf = merged,
                    Fused::Separate(previous, next) => {
                        self.pending = Some(next);
                        return Some(previous);
                    }
                },
            }
        }

        Some(leaf)
    }
}

enum Fused {
    Merged(Leaf),
    Separate(Leaf, Leaf),
}

fn fuse(previous: Leaf, next: Leaf, config: &StyleConfig) -> Fused {
    match (previous, next) {
        (Leaf::Text(a), Leaf::Text(b)) => Fused::Merged(Leaf::Text(a.concat(&b))),
        (Leaf::Styled(a), Leaf::Styled(b)) if objects_match(&a, &b, config) => {
            let text = match (&a.text, &b.text) {
                (Some(a_text), Some(b_text)) => Some(a_text.concat(b_text)),
                _ => None,
            };
            // Whitespace may have lost properties the other side still shows.
            let next_is_whitespace = b
                .text
                .as_ref()
                .is_some_and(|text| TextClass::of_primitive(text).is_whitespace());
            let mut merged = if next_is_whitespace { a } else { b };
            merged.text = text;
            Fused::Merged(Leaf::Styled(merged))
        }
        (Leaf::Text(a), Leaf::Styled(mut b)) if absorbs(&b, &a, config) => {
            b.text = b.text.map(|text| a.concat(&text));
            Fused::Merged(Leaf::Styled(b))
        }
        (Leaf::Styled(mut a), Leaf::Text(b)) if absorbs(&a, &b, config) => {
            a.text = a.text.map(|text| text.concat(&b));
            Fused::Merged(Leaf::Styled(a))
        }
        (previous, next) => Fused::Separate(previous, next),
    }
}

/// Whether two objects with text render the same as one object holding both texts.
///
/// When either text is whitespace only the whitespace-affecting properties need to agree.
/// Properties that are not heritable must always agree.
fn objects_match(a: &StyledObject, b: &StyledObject, config: &StyleConfig) -> bool {
    let (Some(a_text), Some(b_text)) = (&a.text, &b.text) else {
        return false;
    };
    if a.template_args.is_some() || b.template_args.is_some() {
        return false;
    }
    let whitespace = TextClass::of_primitive(a_text).is_whitespace()
        || TextClass::of_primitive(b_text).is_whitespace();
    let agrees = |key: &str| a.properties.get(key) == b.properties.get(key);
    let opaque_agree = a
        .properties
        .keys()
        .chain(b.properties.keys())
        .filter(|key| !config.is_heritable(key))
        .all(agrees);
    opaque_agree
        && config
            .heritable_keys()
            .filter(|key| !whitespace || config.affects_whitespace(key))
            .all(agrees)
}

/// Whether `object` can take in the bare `text` next to it.
///
/// The text must render the same under all of the object's heritable properties, and the object
/// must carry nothing else that would apply to the absorbed text.
fn absorbs(object: &StyledObject, text: &Primitive, config: &StyleConfig) -> bool {
    if object.text.is_none() || object.template_args.is_some() {
        return false;
    }
    let mut keys: SmallVec<[&str; 8]> = SmallVec::new();
    for key in object.properties.keys() {
        if !config.is_heritable(key) {
            return false;
        }
        keys.push(key);
    }
    !text_is_affected(text, &keys, config)
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whether a leaf would render differently if it inherited some heritable properties.

use text_component::{Primitive, StyledObject};

use crate::{Leaf, StyleConfig};

/// What kind of characters a piece of text is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TextClass {
    /// At least one character that is not whitespace.
    Visible,
    /// Only whitespace, with at least one character that is not a line feed.
    Whitespace,
    /// Only line feeds. The empty string also falls here.
    LineBreaks,
}

impl TextClass {
    pub(crate) fn of(text: &str) -> Self {
        if text.chars().all(|c| c == '\n') {
            Self::LineBreaks
        } else if text.chars().all(char::is_whitespace) {
            Self::Whitespace
        } else {
            Self::Visible
        }
    }

    pub(crate) fn of_primitive(text: &Primitive) -> Self {
        match text {
            Primitive::String(text) => Self::of(text),
            // Numbers and booleans always render visible characters.
            _ => Self::Visible,
        }
    }

    #[inline]
    pub(crate) fn is_whitespace(self) -> bool {
        self != Self::Visible
    }
}

/// Returns `true` if `leaf` would render differently after inheriting any of `keys`.
///
/// A leaf that already sets a key is never affected by inheriting it.
pub(crate) fn is_affected_by_inheriting(leaf: &Leaf, keys: &[&str], config: &StyleConfig) -> bool {
    match leaf {
        Leaf::Text(text) => text_is_affected(text, keys, config),
        Leaf::Styled(object) => object_is_affected(object, keys, config),
    }
}

/// Returns `true` if bare `text` would render differently after inheriting any of `keys`.
pub(crate) fn text_is_affected(text: &Primitive, keys: &[&str], config: &StyleConfig) -> bool {
    if keys.is_empty() {
        return false;
    }
    match TextClass::of_primitive(text) {
        TextClass::LineBreaks => false,
        TextClass::Whitespace => keys.iter().any(|key| config.affects_whitespace(key)),
        TextClass::Visible => true,
    }
}

/// Returns `true` if `object` would render differently after inheriting any of `keys`.
pub(crate) fn object_is_affected(
    object: &StyledObject,
    keys: &[&str],
    config: &StyleConfig,
) -> bool {
    let class = object
        .text
        .as_ref()
        .map_or(TextClass::Visible, TextClass::of_primitive);
    let missing = |key: &&str| !object.properties.contains_key(key);
    match class {
        TextClass::LineBreaks => false,
        TextClass::Whitespace => keys
            .iter()
            .any(|key| missing(key) && config.affects_whitespace(key)),
        TextClass::Visible => keys.iter().any(missing),
    }
}

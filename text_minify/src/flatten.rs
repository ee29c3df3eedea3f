// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::slice;

use text_component::{Component, Primitive, Properties, StyledObject, Value};

use crate::StyleConfig;

/// A component that cannot be split any further.
///
/// Leaves are either bare text or an object without children. Every leaf yielded by [`Flatten`]
/// carries its full effective style explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    /// Text with no properties.
    Text(Primitive),
    /// An object without `children`.
    Styled(StyledObject),
}

impl From<Leaf> for Component {
    fn from(leaf: Leaf) -> Self {
        match leaf {
            Leaf::Text(text) => Self::Primitive(text),
            Leaf::Styled(object) => Self::Object(object),
        }
    }
}

#[derive(Clone, Debug)]
struct Frame<'a> {
    components: slice::Iter<'a, Component>,
    /// Heritable properties applied to every component in this frame.
    context: Properties,
}

/// An iterator over the leaves of a component, in document order.
///
/// Inherited heritable properties are copied onto each leaf, so every yielded leaf renders the
/// same on its own as it did in the tree. Empty bare text is skipped. Leaves are owned copies,
/// and `templateArgs` are copied through untouched.
///
/// ```
/// use serde_json::json;
/// use text_component::{Component, StyledObject};
/// use text_minify::{Flatten, Leaf, StyleConfig};
///
/// let config = StyleConfig::new().heritable("color");
/// let component = Component::try_from(json!({
///     "text": "a",
///     "color": "red",
///     "children": ["b", ""],
/// }))
/// .unwrap();
///
/// let leaves: Vec<_> = Flatten::new(&component, &config).collect();
/// assert_eq!(
///     leaves,
///     [
///         Leaf::Styled(StyledObject::from_text("a").with_property("color", "red")),
///         Leaf::Styled(StyledObject::from_text("b").with_property("color", "red")),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    config: &'a StyleConfig,
    stack: Vec<Frame<'a>>,
}

impl<'a> Flatten<'a> {
    /// Creates an iterator over the leaves of `component`.
    pub fn new(component: &'a Component, config: &'a StyleConfig) -> Self {
        Self {
            config,
            stack: vec![Frame {
                components: slice::from_ref(component).iter(),
                context: Properties::new(),
            }],
        }
    }
}

impl Iterator for Flatten<'_> {
    type Item = Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(component) = frame.components.next() else {
                self.stack.pop();
                continue;
            };
            let context = frame.context.clone();

            match component {
                Component::Primitive(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    if context.is_empty() {
                        return Some(Leaf::Text(text.clone()));
                    }
                    return Some(Leaf::Styled(StyledObject {
                        text: Some(text.clone()),
                        properties: context,
                        ..StyledObject::default()
                    }));
                }
                Component::Sequence(items) => {
                    let Some((head, rest)) = items.split_first() else {
                        continue;
                    };
                    let mut rest_context = context.clone();
                    for (key, value) in exposed_style(head, self.config).iter() {
                        rest_context.insert(key, value.clone());
                    }
                    self.stack.push(Frame {
                        components: rest.iter(),
                        context: rest_context,
                    });
                    self.stack.push(Frame {
                        components: slice::from_ref(head).iter(),
                        context,
                    });
                }
                Component::Object(object) => {
                    if let Some(children) = object.children.as_deref() {
                        let mut child_context = context.clone();
                        child_context.extend(
                            own_heritable(object, self.config)
                                .map(|(key, value)| (key, value.clone())),
                        );
                        self.stack.push(Frame {
                            components: children.iter(),
                            context: child_context,
                        });
                    }
                    let mut properties = object.properties.clone();
                    for (key, value) in context.iter() {
                        properties.insert_if_absent(key, value);
                    }
                    return Some(Leaf::Styled(StyledObject {
                        text: object.text.clone(),
                        children: None,
                        template_args: object.template_args.clone(),
                        properties,
                    }));
                }
            }
        }
    }
}

fn own_heritable<'o>(
    object: &'o StyledObject,
    config: &'o StyleConfig,
) -> impl Iterator<Item = (&'o str, &'o Value)> {
    object
        .properties
        .iter()
        .filter(|(key, _)| config.is_heritable(key))
}

/// Returns the heritable properties `component` passes on to the rest of a sequence it heads.
///
/// For an object, these are its own heritable properties. A sequence exposes whatever its first
/// element exposes. Bare text exposes nothing.
pub(crate) fn exposed_style(component: &Component, config: &StyleConfig) -> Properties {
    let mut component = component;
    loop {
        match component {
            Component::Primitive(_) => return Properties::new(),
            Component::Object(object) => {
                return own_heritable(object, config)
                    .map(|(key, value)| (key, value.clone()))
                    .collect();
            }
            Component::Sequence(items) => match items.first() {
                Some(head) => component = head,
                None => return Properties::new(),
            },
        }
    }
}

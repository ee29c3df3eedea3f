// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde_json::{Number, Value};

use crate::Properties;

/// A literal piece of text.
///
/// Numbers and booleans render as their textual form, exactly like strings.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A string.
    String(String),
    /// A JSON number.
    Number(Number),
    /// A boolean, rendered as `true` or `false`.
    Bool(bool),
}

impl Primitive {
    /// Returns `true` if this renders as no text at all.
    ///
    /// Only the empty string is empty; numbers and booleans always render something.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::String(text) if text.is_empty())
    }

    /// Returns the rendered text.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::String(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Concatenates the rendered text of `self` and `other` into a new string primitive.
    pub fn concat(&self, other: &Self) -> Self {
        let mut text = self.to_text().into_owned();
        text.push_str(&other.to_text());
        Self::String(text)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.write_str(text),
            // Integral floats render without a fractional part (`1.0` is `1`).
            Self::Number(number) => match number.as_f64().filter(|_| number.is_f64()) {
                Some(float) => write!(f, "{float}"),
                None => write!(f, "{number}"),
            },
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(text: &str) -> Self {
        Self::String(text.into())
    }
}

impl From<String> for Primitive {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Primitive {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

impl From<i64> for Primitive {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

/// A component carrying its own properties.
///
/// `text` is the literal content, `children` are appended after it and inherit its heritable
/// properties, and `template_args` are substituted into non-literal content (such as a
/// translation key held in `properties`) by the consumer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledObject {
    /// The literal text of this object, if any.
    pub text: Option<Primitive>,
    /// Components rendered after this object's own content.
    pub children: Option<Vec<Component>>,
    /// Arguments substituted into this object's content by the consumer.
    pub template_args: Option<Vec<Component>>,
    /// Every other property, heritable or not, in insertion order.
    ///
    /// Objects parsed from JSON insert their properties in the order `serde_json` yields them.
    pub properties: Properties,
}

impl StyledObject {
    /// Creates an object with no text and no properties.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object holding `text` and nothing else.
    pub fn from_text(text: impl Into<Primitive>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets a property, returning the updated object.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Replaces all properties, returning the updated object.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the children, returning the updated object.
    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = Some(children);
        self
    }

    /// Sets the template arguments, returning the updated object.
    pub fn with_template_args(mut self, template_args: Vec<Component>) -> Self {
        self.template_args = Some(template_args);
        self
    }

    /// Returns `true` if the object carries literal text equal to the empty string.
    #[inline]
    pub fn has_empty_text(&self) -> bool {
        self.text.as_ref().is_some_and(Primitive::is_empty)
    }
}

/// A tree of rich text.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// Literal text with no properties of its own.
    Primitive(Primitive),
    /// An object with its own properties.
    Object(StyledObject),
    /// A concatenation of components.
    ///
    /// The heritable properties exposed by the first element also apply to the rest.
    Sequence(Vec<Component>),
}

impl Component {
    /// Returns an empty string component.
    #[inline]
    pub fn empty() -> Self {
        Self::Primitive(Primitive::String(String::new()))
    }

    /// Returns the object if this is [`Component::Object`].
    pub fn as_object(&self) -> Option<&StyledObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the elements if this is [`Component::Sequence`].
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Primitive> for Component {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<StyledObject> for Component {
    fn from(object: StyledObject) -> Self {
        Self::Object(object)
    }
}

impl From<Vec<Self>> for Component {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Self::Primitive(text.into())
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Self::Primitive(text.into())
    }
}

impl From<bool> for Component {
    fn from(value: bool) -> Self {
        Self::Primitive(value.into())
    }
}

impl From<i64> for Component {
    fn from(number: i64) -> Self {
        Self::Primitive(number.into())
    }
}

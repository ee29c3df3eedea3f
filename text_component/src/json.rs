// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between [`Component`] and JSON.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use serde::de::Error as _;
use serde::ser::SerializeMap as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Component, Error, ErrorKind, Primitive, Properties, StyledObject};

/// JSON key holding an object's literal text.
pub const TEXT_KEY: &str = "text";

/// JSON key holding an object's children.
pub const CHILDREN_KEY: &str = "children";

/// JSON key holding an object's template arguments.
pub const TEMPLATE_ARGS_KEY: &str = "templateArgs";

impl Component {
    /// Returns the compact JSON encoding of this component.
    ///
    /// Objects encode `text` first, then their properties in order, then `children` and
    /// `templateArgs`.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns the length in bytes of [`Self::to_json_string`].
    pub fn encoded_len(&self) -> usize {
        self.to_json_string().len()
    }
}

impl TryFrom<Value> for Component {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Converter::default().component(value)
    }
}

impl From<Primitive> for Value {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::String(text) => Self::String(text),
            Primitive::Number(number) => Self::Number(number),
            Primitive::Bool(value) => Self::Bool(value),
        }
    }
}

impl From<Component> for Value {
    fn from(component: Component) -> Self {
        match component {
            Component::Primitive(primitive) => primitive.into(),
            Component::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Component::Object(object) => {
                let StyledObject {
                    text,
                    children,
                    template_args,
                    properties,
                } = object;
                let mut map = Map::new();
                if let Some(text) = text {
                    map.insert(TEXT_KEY.into(), text.into());
                }
                for (key, value) in properties.iter() {
                    map.insert(key.into(), value.clone());
                }
                if let Some(children) = children {
                    map.insert(CHILDREN_KEY.into(), Self::from(Component::Sequence(children)));
                }
                if let Some(args) = template_args {
                    map.insert(TEMPLATE_ARGS_KEY.into(), Self::from(Component::Sequence(args)));
                }
                Self::Object(map)
            }
        }
    }
}

/// Recursive `Value` to `Component` conversion that tracks the JSON pointer of the value
/// being converted.
#[derive(Default)]
struct Converter {
    path: String,
}

impl Converter {
    fn component(&mut self, value: Value) -> Result<Component, Error> {
        match value {
            Value::Null => Err(Error::new(ErrorKind::UnsupportedValue, &self.path)),
            Value::Array(items) => self.list(items).map(Component::Sequence),
            Value::Object(map) => self.object(map).map(Component::Object),
            primitive => self
                .primitive(primitive)
                .map(Component::Primitive)
                .ok_or_else(|| Error::new(ErrorKind::UnsupportedValue, &self.path)),
        }
    }

    fn primitive(&self, value: Value) -> Option<Primitive> {
        match value {
            Value::String(text) => Some(Primitive::String(text)),
            Value::Number(number) => Some(Primitive::Number(number)),
            Value::Bool(value) => Some(Primitive::Bool(value)),
            _ => None,
        }
    }

    fn list(&mut self, items: Vec<Value>) -> Result<Vec<Component>, Error> {
        let mut components = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let len = self.path.len();
            let _ = write!(self.path, "/{index}");
            components.push(self.component(item)?);
            self.path.truncate(len);
        }
        Ok(components)
    }

    fn object(&mut self, map: Map<String, Value>) -> Result<StyledObject, Error> {
        let mut object = StyledObject {
            properties: Properties::with_capacity(map.len()),
            ..StyledObject::default()
        };
        for (key, value) in map {
            let len = self.path.len();
            self.push_key(&key);
            match key.as_str() {
                TEXT_KEY => {
                    let text = self
                        .primitive(value)
                        .ok_or_else(|| Error::new(ErrorKind::InvalidText, &self.path))?;
                    object.text = Some(text);
                }
                CHILDREN_KEY => {
                    let Value::Array(items) = value else {
                        return Err(Error::new(ErrorKind::InvalidChildren, &self.path));
                    };
                    object.children = Some(self.list(items)?);
                }
                TEMPLATE_ARGS_KEY => {
                    let Value::Array(items) = value else {
                        return Err(Error::new(ErrorKind::InvalidTemplateArgs, &self.path));
                    };
                    object.template_args = Some(self.list(items)?);
                }
                _ => {
                    object.properties.insert(key, value);
                }
            }
            self.path.truncate(len);
        }
        Ok(object)
    }

    fn push_key(&mut self, key: &str) {
        self.path.push('/');
        for c in key.chars() {
            match c {
                '~' => self.path.push_str("~0"),
                '/' => self.path.push_str("~1"),
                c => self.path.push(c),
            }
        }
    }
}

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(text) => serializer.serialize_str(text),
            Self::Number(number) => number.serialize(serializer),
            Self::Bool(value) => serializer.serialize_bool(*value),
        }
    }
}

impl Serialize for StyledObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(self.text.is_some())
            + self.properties.len()
            + usize::from(self.children.is_some())
            + usize::from(self.template_args.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(text) = &self.text {
            map.serialize_entry(TEXT_KEY, text)?;
        }
        for (key, value) in self.properties.iter() {
            map.serialize_entry(key, value)?;
        }
        if let Some(children) = &self.children {
            map.serialize_entry(CHILDREN_KEY, children)?;
        }
        if let Some(args) = &self.template_args {
            map.serialize_entry(TEMPLATE_ARGS_KEY, args)?;
        }
        map.end()
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Primitive(primitive) => primitive.serialize(serializer),
            Self::Object(object) => object.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
        }
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Component, ErrorKind, Primitive, StyledObject, Value};
    use alloc::string::ToString;
    use alloc::vec;
    use serde_json::json;

    #[test]
    fn converts_nested_objects() {
        let component = Component::try_from(json!({
            "text": "a",
            "bold": true,
            "children": ["b", 3, {"text": false, "color": "red"}],
            "templateArgs": [["c"]],
        }))
        .unwrap();

        let expected = StyledObject::from_text("a")
            .with_property("bold", true)
            .with_children(vec![
                "b".into(),
                3_i64.into(),
                StyledObject::from_text(false)
                    .with_property("color", "red")
                    .into(),
            ])
            .with_template_args(vec![Component::Sequence(vec!["c".into()])]);
        assert_eq!(component, expected.into());
    }

    #[test]
    fn serializes_text_first() {
        let object = StyledObject::from_text("x")
            .with_property("italic", true)
            .with_property("color", "gold")
            .with_children(vec!["y".into()]);
        assert_eq!(
            Component::from(object).to_json_string(),
            r#"{"text":"x","italic":true,"color":"gold","children":["y"]}"#
        );
    }

    #[test]
    fn value_round_trip_preserves_structure() {
        let value = json!([
            {"text": "a", "color": "red", "children": [{"templateArgs": ["b"]}]},
            1.5,
        ]);
        let component = Component::try_from(value.clone()).unwrap();
        assert_eq!(Value::from(component), value);
    }

    #[test]
    fn deserializes_from_str() {
        let component: Component = serde_json::from_str(r#"["", {"text": "x"}]"#).unwrap();
        assert_eq!(
            component,
            Component::Sequence(vec![
                Primitive::from("").into(),
                StyledObject::from_text("x").into()
            ])
        );
        assert!(serde_json::from_str::<Component>("null").is_err());
    }

    #[test]
    fn reports_error_paths() {
        let error = Component::try_from(Value::Null).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedValue);
        assert_eq!(error.path(), "");
        assert_eq!(error.to_string(), "unsupported value at the root");

        let error = Component::try_from(json!(["a", {"children": ["b", null]}])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedValue);
        assert_eq!(error.path(), "/1/children/1");

        let error = Component::try_from(json!([{"text": ["nested"]}])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidText);
        assert_eq!(error.path(), "/0/text");

        let error = Component::try_from(json!({"children": "a"})).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidChildren);

        let error = Component::try_from(json!({"templateArgs": {}})).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidTemplateArgs);
        assert_eq!(error.path(), "/templateArgs");
    }

    #[test]
    fn opaque_values_pass_through() {
        let component = Component::try_from(json!({
            "text": "click",
            "clickEvent": {"action": "open_url", "value": "https://example.com"},
        }))
        .unwrap();
        let object = component.as_object().unwrap();
        assert_eq!(
            object.properties.get("clickEvent"),
            Some(&json!({"action": "open_url", "value": "https://example.com"}))
        );
    }
}

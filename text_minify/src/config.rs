// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use text_component::Value;

/// Estimates how many bytes one instance of a property occupies in encoded output.
pub type PropertySizeEstimator = fn(&str, &Value) -> usize;

#[derive(Clone, Debug, PartialEq, Eq)]
struct HeritableKey {
    name: String,
    affects_whitespace: bool,
}

/// Which properties cascade, and how they interact with whitespace.
///
/// A heritable property set on an object applies to that object's children, and a heritable
/// property exposed by the first element of a sequence applies to the rest of the sequence.
/// Properties that are not heritable only ever apply to the object that sets them.
///
/// Text made only of whitespace is rendered identically under every heritable property except
/// the whitespace-affecting ones (an underline, say). Text made only of line feeds is rendered
/// identically under every property.
///
/// ```
/// use text_minify::StyleConfig;
///
/// let config = StyleConfig::new()
///     .heritable("color")
///     .heritable("bold")
///     .whitespace_affecting("underlined");
///
/// assert!(config.is_heritable("bold"));
/// assert!(!config.affects_whitespace("bold"));
/// assert!(config.affects_whitespace("underlined"));
/// assert!(!config.is_heritable("translate"));
/// ```
#[derive(Clone, Debug)]
pub struct StyleConfig {
    keys: Vec<HeritableKey>,
    size_estimator: PropertySizeEstimator,
}

impl StyleConfig {
    /// Creates a configuration with no heritable properties and the default size estimator,
    /// [`encoded_property_len`].
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            size_estimator: encoded_property_len,
        }
    }

    /// Declares `name` as a heritable property that has no visible effect on whitespace.
    pub fn heritable(self, name: impl Into<String>) -> Self {
        self.with_key(name.into(), false)
    }

    /// Declares `name` as a heritable property that is visible even on whitespace.
    pub fn whitespace_affecting(self, name: impl Into<String>) -> Self {
        self.with_key(name.into(), true)
    }

    /// Replaces the property size estimator.
    pub fn size_estimator(mut self, estimator: PropertySizeEstimator) -> Self {
        self.size_estimator = estimator;
        self
    }

    fn with_key(mut self, name: String, affects_whitespace: bool) -> Self {
        match self.keys.iter_mut().find(|key| key.name == name) {
            Some(key) => key.affects_whitespace = affects_whitespace,
            None => self.keys.push(HeritableKey {
                name,
                affects_whitespace,
            }),
        }
        self
    }

    /// Iterates over the heritable property names in declaration order.
    pub fn heritable_keys(&self) -> impl ExactSizeIterator<Item = &str> + Clone {
        self.keys.iter().map(|key| key.name.as_str())
    }

    /// Returns `true` if `key` names a heritable property.
    pub fn is_heritable(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.name == key)
    }

    /// Returns `true` if `key` names a heritable property that is visible on whitespace.
    pub fn affects_whitespace(&self, key: &str) -> bool {
        self.keys
            .iter()
            .any(|k| k.affects_whitespace && k.name == key)
    }

    /// Estimates the encoded size of one instance of the property.
    #[inline]
    pub fn property_size(&self, key: &str, value: &Value) -> usize {
        (self.size_estimator)(key, value)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the length of the compact JSON encoding of the `"key":value` pair.
pub fn encoded_property_len(key: &str, value: &Value) -> usize {
    property_identity(key, value).len()
}

/// The canonical `"key":value` encoding, which identifies a property by key and value.
pub(crate) fn property_identity(key: &str, value: &Value) -> String {
    let mut identity = serde_json::to_string(key).unwrap_or_default();
    identity.push(':');
    identity.push_str(&serde_json::to_string(value).unwrap_or_default());
    identity
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Error returned when a JSON value is not a well-formed component.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the JSON pointer of the offending value,
/// relative to the value that was being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// JSON pointer (RFC 6901) to the offending value. Empty for the root.
    path: String,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The JSON pointer to the offending value, such as `/0/children/1`.
    ///
    /// This is the empty string when the root value itself is at fault.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn new(kind: ErrorKind, path: &str) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            ErrorKind::UnsupportedValue => "unsupported value",
            ErrorKind::InvalidText => "`text` must be a string, number, or boolean",
            ErrorKind::InvalidChildren => "`children` must be an array",
            ErrorKind::InvalidTemplateArgs => "`templateArgs` must be an array",
        };
        if self.path.is_empty() {
            write!(f, "{what} at the root")
        } else {
            write!(f, "{what} at {}", self.path)
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The value is neither a primitive, an object, nor an array (for example `null`).
    UnsupportedValue,

    /// An object's `text` is not a primitive.
    InvalidText,

    /// An object's `children` is not an array.
    InvalidChildren,

    /// An object's `templateArgs` is not an array.
    InvalidTemplateArgs,
}

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering-preserving minification of [`text_component`] trees.
//!
//! Rich text authored by hand (or produced by layout helpers) tends to be deeply nested and to
//! repeat the same style on many small pieces. [`minify`] rewrites such a tree into one that
//! renders identically and is as small as it reasonably can be:
//!
//! 1. The tree is flattened into leaves that each carry their full effective style ([`Flatten`]).
//! 2. Each leaf is simplified on its own: empty text is dropped, properties that cannot show
//!    on whitespace or line breaks are removed, and leaves left with only text become bare text.
//! 3. Adjacent leaves that render the same as their concatenation are merged.
//! 4. Heritable properties shared by runs of leaves are hoisted into the head of a new array,
//!    so that they are declared once instead of on every leaf.
//! 5. If the first element of the result would pass its style on to the rest, an empty string
//!    is put in front of it.
//!
//! Which properties are heritable, which of those are visible on whitespace, and how large a
//! property is when encoded all come from a [`StyleConfig`].
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use text_minify::{minify_json, StyleConfig};
//!
//! let config = StyleConfig::new().heritable("color").heritable("bold");
//! let minified = minify_json(
//!     json!([
//!         {"text": "a", "color": "red"},
//!         {"text": "b", "color": "green"},
//!         {"text": "c", "color": "blue"},
//!         {"text": "d", "color": "green"},
//!     ]),
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     minified,
//!     json!([
//!         {"text": "a", "color": "red"},
//!         [{"text": "b", "color": "green"}, {"text": "c", "color": "blue"}, "d"],
//!     ])
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in `text_component` and `serde_json`.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod config;
mod factor;
mod flatten;
mod guard;
mod inherit;
mod merge;
mod minify;
mod reduce;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{encoded_property_len, PropertySizeEstimator, StyleConfig};
pub use flatten::{Flatten, Leaf};
pub use minify::{flatten, minify, minify_json, with_default_style};
pub use traits::{reflow_minified, MeasureWidth, Reflow};

// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Component is a Rust crate for working with tree-shaped rich text.
//!
//! A [`Component`] is one of:
//!
//! - a [`Primitive`]: a string, number, or boolean rendered as literal text,
//! - a [`StyledObject`]: optional `text`, optional `children`, optional `templateArgs`, and an
//!   ordered set of other [`Properties`] (style attributes, interaction bindings, and anything
//!   else the consumer understands),
//! - a sequence: an ordered list of components denoting concatenation.
//!
//! Which properties cascade to descendants is not decided here; that is configuration owned by
//! whoever interprets the tree. This crate only stores the tree and converts it to and from JSON.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use text_component::{Component, StyledObject};
//!
//! let component = Component::try_from(json!([
//!     {"text": "Hello", "color": "red"},
//!     ", world!"
//! ]))
//! .unwrap();
//!
//! let expected = Component::Sequence(vec![
//!     StyledObject::from_text("Hello")
//!         .with_property("color", "red")
//!         .into(),
//!     ", world!".into(),
//! ]);
//! assert_eq!(component, expected);
//! assert_eq!(component.to_json_string(), r#"[{"text":"Hello","color":"red"},", world!"]"#);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in `serde` and `serde_json`.
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

mod component;
mod error;
mod json;
mod properties;

pub use crate::component::{Component, Primitive, StyledObject};
pub use crate::error::{Error, ErrorKind};
pub use crate::json::{CHILDREN_KEY, TEMPLATE_ARGS_KEY, TEXT_KEY};
pub use crate::properties::Properties;

pub use serde_json::{Number, Value};

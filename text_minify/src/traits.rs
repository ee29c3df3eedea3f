// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_component::Component;

use crate::{minify, StyleConfig};

/// Measures how wide a component renders.
///
/// Implementations live with whoever knows the glyph metrics. Equivalent components must
/// measure the same, so measuring a minified component is always valid.
pub trait MeasureWidth {
    /// Returns the rendered width of `component`, never negative.
    fn width(&self, component: &Component) -> f32;
}

/// Restructures a component for display, such as wrapping it to a width or padding it.
pub trait Reflow {
    /// Returns the restructured component.
    fn reflow(&self, component: &Component) -> Component;
}

/// Runs `reflow` on `component` and minifies what it produces.
///
/// Reflowing tends to nest the input in new arrays and objects, which is exactly what
/// minification removes again.
pub fn reflow_minified<R: Reflow + ?Sized>(
    reflow: &R,
    component: &Component,
    config: &StyleConfig,
) -> Component {
    minify(&reflow.reflow(component), config)
}

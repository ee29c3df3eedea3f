// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests, checked against a renderer that shares no code with the minifier.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use serde_json::{json, Value};
use text_component::{Component, ErrorKind, Primitive, Properties, StyledObject};

use crate::{
    flatten, minify, minify_json, reflow_minified, with_default_style, MeasureWidth, Reflow,
    StyleConfig,
};

/// A configuration modelled on a typical chat client.
pub(crate) fn test_config() -> StyleConfig {
    StyleConfig::new()
        .heritable("color")
        .whitespace_affecting("font")
        .heritable("bold")
        .heritable("italic")
        .whitespace_affecting("underlined")
        .whitespace_affecting("strikethrough")
        .heritable("obfuscated")
        .whitespace_affecting("insertion")
        .whitespace_affecting("clickEvent")
        .whitespace_affecting("hoverEvent")
}

fn component(value: Value) -> Component {
    Component::try_from(value).unwrap()
}

fn minified(value: Value) -> Value {
    minify_json(value, &test_config()).unwrap()
}

type Style = BTreeMap<String, Value>;

/// What a client would put on screen for one piece of a component.
#[derive(Clone, Debug, PartialEq)]
enum Unit {
    Char(char, Style),
    /// An object without text, such as a translated message, with its rendered arguments.
    Embedded(Style, Vec<Vec<Unit>>),
}

fn render(component: &Component, config: &StyleConfig) -> Vec<Unit> {
    let mut units = Vec::new();
    render_into(component, &Style::new(), config, &mut units);
    units
}

fn render_into(
    component: &Component,
    inherited: &Style,
    config: &StyleConfig,
    units: &mut Vec<Unit>,
) {
    match component {
        Component::Primitive(text) => render_text(text, inherited, config, units),
        Component::Sequence(items) => {
            let Some((head, rest)) = items.split_first() else {
                return;
            };
            render_into(head, inherited, config, units);
            let mut context = inherited.clone();
            context.extend(exposed(head, config));
            for item in rest {
                render_into(item, &context, config, units);
            }
        }
        Component::Object(object) => {
            let mut context = inherited.clone();
            let mut own = Style::new();
            for (key, value) in object.properties.iter() {
                if config.is_heritable(key) {
                    context.insert(key.to_string(), value.clone());
                } else {
                    own.insert(key.to_string(), value.clone());
                }
            }
            let mut style = context.clone();
            style.extend(own);
            match &object.text {
                Some(text) => render_text(text, &style, config, units),
                None => {
                    let args = object
                        .template_args
                        .iter()
                        .flatten()
                        .map(|arg| render(arg, config))
                        .collect();
                    units.push(Unit::Embedded(style, args));
                }
            }
            for child in object.children.iter().flatten() {
                render_into(child, &context, config, units);
            }
        }
    }
}

fn render_text(text: &Primitive, style: &Style, config: &StyleConfig, units: &mut Vec<Unit>) {
    for c in text.to_text().chars() {
        let visible = match c {
            '\n' => Style::new(),
            c if c.is_whitespace() => style
                .iter()
                .filter(|(key, _)| !config.is_heritable(key) || config.affects_whitespace(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            _ => style.clone(),
        };
        units.push(Unit::Char(c, visible));
    }
}

fn exposed(component: &Component, config: &StyleConfig) -> Style {
    match component {
        Component::Primitive(_) => Style::new(),
        Component::Object(object) => object
            .properties
            .iter()
            .filter(|(key, _)| config.is_heritable(key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
        Component::Sequence(items) => items
            .first()
            .map(|head| exposed(head, config))
            .unwrap_or_default(),
    }
}

fn scenario_1() -> Value {
    json!([
        {"text": "a", "color": "red"},
        {"text": "b", "color": "green"},
        {"text": "c", "color": "blue"},
        {"text": "d", "color": "green"},
    ])
}

fn scenario_5() -> Value {
    json!([
        {"text": "a", "color": "red"},
        {"text": "b", "color": "red", "bold": true},
        {"text": "c", "color": "red"},
    ])
}

fn straddling() -> Value {
    json!([
        "",
        {"text": "x", "color": "red"},
        {"text": "y", "color": "red", "bold": true},
        {"text": "z", "bold": true},
    ])
}

/// Inputs with at least two leaves that cannot be merged away.
fn layered_corpus() -> Vec<Value> {
    vec![
        scenario_1(),
        scenario_5(),
        straddling(),
        json!({
            "text": "",
            "color": "red",
            "children": [
                {"text": "a", "bold": true},
                " ",
                {"text": "b", "underlined": true},
                "\n",
                "c",
            ],
        }),
        json!([
            {"text": "Hello", "color": "gold", "bold": true},
            " ",
            "world",
            {"text": "!", "color": "red"},
        ]),
        json!([
            {"text": "click", "selector": "@a", "color": "aqua"},
            " ",
            {"text": "here", "color": "aqua", "selector": "@p"},
        ]),
        json!([
            {"text": "<", "color": "gray"},
            {
                "translate": "chat.type",
                "color": "gray",
                "templateArgs": [[{"text": "a", "bold": true}, {"text": "b", "bold": true}]],
            },
            {"text": ">", "color": "gray"},
        ]),
        json!([
            {"text": "a", "underlined": true, "bold": true},
            {"text": "  ", "underlined": true, "bold": true},
            {"text": "\n", "italic": true},
            {"text": "b", "bold": true},
        ]),
    ]
}

/// Everything in [`layered_corpus`] plus inputs that collapse to a single leaf or less.
fn corpus() -> Vec<Value> {
    let mut corpus = layered_corpus();
    corpus.extend([
        json!({
            "text": "",
            "children": [
                [[{"text": "a", "italic": true}], ["b"]],
                {"text": "c", "italic": true, "children": ["d"]},
            ],
        }),
        json!([{"text": 1, "color": "red"}, {"text": true, "color": "red"}, "x"]),
        json!([[], "", {"text": "", "color": "red"}, "x"]),
        json!([]),
    ]);
    corpus
}

#[test]
fn scenario_nested_range_around_interruption() {
    assert_eq!(
        minified(scenario_1()),
        json!([
            {"text": "a", "color": "red"},
            [{"text": "b", "color": "green"}, {"text": "c", "color": "blue"}, "d"],
        ])
    );
}

#[test]
fn scenario_collapses_to_primitive() {
    assert_eq!(minified(json!(["", "x"])), json!("x"));
}

#[test]
fn scenario_merges_equal_styles() {
    assert_eq!(
        minified(json!([{"text": "a", "bold": true}, {"text": "b", "bold": true}])),
        json!({"text": "ab", "bold": true})
    );
}

#[test]
fn scenario_strips_style_from_whitespace() {
    assert_eq!(minified(json!({"text": "   ", "bold": true})), json!("   "));
}

#[test]
fn scenario_factors_shared_color() {
    assert_eq!(
        minified(scenario_5()),
        json!([{"text": "a", "color": "red"}, {"text": "b", "bold": true}, "c"])
    );
}

#[test]
fn straddling_ranges_are_split() {
    assert_eq!(
        minified(straddling()),
        json!([
            "",
            [{"text": "x", "color": "red"}, {"text": "y", "bold": true}],
            {"text": "z", "bold": true},
        ])
    );
}

#[test]
fn minified_renders_the_same() {
    let config = test_config();
    for value in corpus() {
        let input = component(value);
        let output = minify(&input, &config);
        assert_eq!(
            render(&output, &config),
            render(&input, &config),
            "{} minified to {}",
            input.to_json_string(),
            output.to_json_string()
        );
    }
}

#[test]
fn flattened_renders_the_same() {
    let config = test_config();
    for value in corpus() {
        let input = component(value);
        assert_eq!(
            render(&flatten(&input, &config), &config),
            render(&input, &config)
        );
    }
}

#[test]
fn minifying_twice_renders_the_same() {
    let config = test_config();
    for value in corpus() {
        let once = minify(&component(value), &config);
        let twice = minify(&once, &config);
        assert_eq!(render(&twice, &config), render(&once, &config));
    }
}

#[test]
fn minified_is_no_larger_than_flattened() {
    let config = test_config();
    for value in layered_corpus() {
        let input = component(value);
        let output = minify(&input, &config);
        let flat = flatten(&input, &config);
        assert!(
            output.encoded_len() <= flat.encoded_len(),
            "{} is larger than {}",
            output.to_json_string(),
            flat.to_json_string()
        );
    }
}

#[test]
fn output_has_no_empty_leaves() {
    fn check(component: &Component, leading: bool) {
        match component {
            Component::Primitive(text) => assert!(leading || !text.is_empty()),
            Component::Object(object) => {
                for child in object.children.iter().flatten() {
                    check(child, false);
                }
            }
            Component::Sequence(items) => {
                assert!(!items.is_empty());
                for (index, item) in items.iter().enumerate() {
                    check(item, leading && index == 0);
                }
            }
        }
    }

    let config = test_config();
    for value in corpus() {
        let output = minify(&component(value), &config);
        check(&output, true);
    }
}

#[test]
fn nothing_minifies_to_empty_text() {
    assert_eq!(minified(json!([])), json!(""));
    assert_eq!(minified(json!({"text": "", "bold": true})), json!(""));
    assert_eq!(
        minified(json!(["", [""], {"text": "", "translate": "k"}])),
        json!("")
    );
}

#[test]
fn template_arguments_are_minified() {
    let output = minified(json!({
        "translate": "chat.type",
        "templateArgs": [["", "x"], {"text": " ", "bold": true}],
    }));
    assert_eq!(output, json!({"translate": "chat.type", "templateArgs": ["x", " "]}));
}

#[test]
fn invalid_json_is_reported() {
    let config = test_config();
    let error = minify_json(json!(null), &config).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnsupportedValue);
    assert_eq!(error.path(), "");

    let error = minify_json(json!(["a", {"text": ["b"]}]), &config).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidText);
    assert_eq!(error.path(), "/1/text");
}

#[test]
fn default_style_fills_in_missing_properties() {
    let config = test_config();
    let properties: Properties = [("color", "gray")].into_iter().collect();
    let input = component(json!({"text": "a", "bold": true}));
    let styled = with_default_style(properties, &input, &config);
    assert_eq!(
        Value::from(styled),
        json!({"text": "a", "bold": true, "color": "gray"})
    );
}

struct Pad {
    width: usize,
}

impl Reflow for Pad {
    fn reflow(&self, component: &Component) -> Component {
        let padding: String = " ".repeat(self.width);
        StyledObject::from_text("")
            .with_property("color", "gray")
            .with_children(vec![component.clone(), padding.into()])
            .into()
    }
}

struct CharCount {
    config: StyleConfig,
}

impl MeasureWidth for CharCount {
    fn width(&self, component: &Component) -> f32 {
        render(component, &self.config).len() as f32
    }
}

#[test]
fn reflowed_output_is_minified() {
    let config = test_config();
    let pad = Pad { width: 2 };
    let output = reflow_minified(&pad, &"abc".into(), &config);
    assert_eq!(Value::from(output), json!({"text": "abc  ", "color": "gray"}));
}

#[test]
fn minifying_keeps_width() {
    let measure = CharCount {
        config: test_config(),
    };
    for value in corpus() {
        let input = component(value);
        let output = minify(&input, &measure.config);
        assert_eq!(measure.width(&output), measure.width(&input));
    }
}

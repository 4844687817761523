//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Tempa.
//! The Tempa project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Tempa Core Tests - Template
//!
//! The injector algorithm: operator ordering, scope propagation, jumps,
//! subtree injection, re-injection and configuration.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test template
//! ```

#[path = "../common/mod.rs"]
mod common;

use std::io::Write;

use serde_json::json;
use tempa::{TpContent, TpTemplateConfig, TpTree};

/// Tests that object scopes flow into children.
#[test]
fn test_object_scope_propagates() {
    let html = common::render(
        r#"<div data-object="user"><h1 data-text="name"/><p data-text=".site"/></div>"#,
        json!({"site": "tempa.dev", "user": {"name": "Ada"}}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div data-object="user"><h1 data-text="name">Ada</h1><p data-text=".site">tempa.dev</p></div>"#
    );
}

/// Tests that attribute operators run before the content operator.
#[test]
fn test_attributes_then_content() {
    let html = common::render(
        r#"<a data-text="label" data-href="url"/>"#,
        json!({"label": "Home", "url": "/"}),
    )
    .unwrap();
    assert_eq!(html, r#"<a data-text="label" data-href="url" href="/">Home</a>"#);
}

/// Tests that a jump redirects processing to the target element.
#[test]
fn test_goto_redirects_to_target() {
    let html = common::render(
        r#"<div><p data-goto="target" data-text="ignored"/><p id="target" data-text="name"/></div>"#,
        json!({"name": "Ada"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><p data-goto="target" data-text="ignored"/><p id="target" data-text="name">Ada</p></div>"#
    );
}

/// Tests that a missing jump target violates the contract.
#[test]
fn test_goto_missing_target() {
    let err = common::render(r#"<div><p data-goto="nowhere"/></div>"#, json!({})).unwrap_err();
    assert!(err.is_contract());
}

/// Tests that re-injecting the same model yields identical markup.
#[test]
fn test_reinjection_is_stable() {
    let mut template = common::template(
        r#"<div><ul data-list="items"><li data-text="."/></ul><p data-if="flag" data-text="title"/></div>"#,
    );
    let model = json!({"items": ["a", "b"], "flag": false, "title": "t"});
    template.inject(model.clone()).unwrap();
    let first = template.tree().to_markup();
    template.inject(model).unwrap();
    assert_eq!(template.tree().to_markup(), first);
}

/// Tests subtree injection applies the content operator to the model itself.
#[test]
fn test_inject_subtree() {
    let mut template = common::template(
        r#"<div><ul id="list" data-list=".ignored"><li data-text="."/></ul><p data-text="x">keep</p></div>"#,
    );
    let list = template.tree().get_by_id("list").unwrap();
    template.inject_subtree(list, json!(["x", "y"])).unwrap();
    assert_eq!(
        template.tree().to_markup(),
        r#"<div><ul id="list" data-list=".ignored"><li data-text=".">x</li><li data-text=".">y</li></ul><p data-text="x">keep</p></div>"#
    );
}

/// Tests subtree injection requires a non-terminal content operator.
#[test]
fn test_inject_subtree_requires_content_operator() {
    let mut template = common::template(r#"<div><p id="p" data-text="x"/></div>"#);
    let p = template.tree().get_by_id("p").unwrap();
    assert!(template.inject_subtree(p, json!({})).unwrap_err().is_contract());
}

/// Tests getters registered on a prepared content.
#[test]
fn test_inject_content_with_getters() {
    let mut template = common::template(r#"<p data-text="fullName"/>"#);
    let content = TpContent::new(json!({"first": "Ada", "last": "Lovelace"})).with_getter(
        "getFullName",
        |person| {
            json!(format!(
                "{} {}",
                person["first"].as_str().unwrap_or_default(),
                person["last"].as_str().unwrap_or_default()
            ))
        },
    );
    template.inject_content(&content).unwrap();
    assert_eq!(
        template.tree().to_markup(),
        r#"<p data-text="fullName">Ada Lovelace</p>"#
    );
}

/// Tests a custom directive prefix and hidden class.
#[test]
fn test_custom_config() {
    let config = TpTemplateConfig::new()
        .directive_prefix("tp-")
        .hidden_class("collapsed");
    let mut template =
        common::template(r#"<div><p tp-if="show"/><p data-text="x" tp-text="name"/></div>"#)
            .with_config(config);
    template.inject(json!({"show": false, "name": "Ada"})).unwrap();
    assert_eq!(
        template.tree().to_markup(),
        r#"<div><p tp-if="show" class="collapsed"/><p data-text="x" tp-text="name">Ada</p></div>"#
    );
}

/// Tests loading configuration from a YAML file.
#[test]
fn test_config_from_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "directive_prefix: \"x-\"").unwrap();
    writeln!(file, "hidden_class: gone").unwrap();
    let config = TpTemplateConfig::from_file(file.path()).unwrap();
    assert_eq!(config.directive_prefix, "x-");
    assert_eq!(config.hidden_class, "gone");
    assert_eq!(config.format_attr, "data-format");
}

/// Tests that an invalid configuration is rejected before injection.
#[test]
fn test_invalid_config_rejected() {
    let mut template = common::template("<p/>").with_config(TpTemplateConfig::new().directive_prefix(""));
    assert!(template.inject(json!({})).is_err());
}

/// Tests that a missing property only warns and injection continues.
#[test]
fn test_missing_property_is_soft() {
    common::capture_logs();
    let html = common::render(
        r#"<div><p data-text="missing">stale</p><p data-text="name"/></div>"#,
        json!({"name": "Ada"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><p data-text="missing"/><p data-text="name">Ada</p></div>"#
    );
    let warnings = common::warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("missing"));
    assert!(warnings[0].contains("/div/p[0]"));
    assert!(warnings[0].contains("TextOperator"));
}

/// Tests that repeated re-injection recycles arena slots instead of growing
/// the document.
#[test]
fn test_reinjection_reuses_arena_slots() {
    let mut template = common::template(r#"<ul data-list="items"><li data-text="."/></ul>"#);
    let model = json!({"items": (0..100).collect::<Vec<_>>()});
    template.inject(model.clone()).unwrap();
    let live = template.tree().live_nodes();
    let slots = template.tree().slot_count();
    assert_eq!(live, 202);

    for _ in 0..1000 {
        template.inject(model.clone()).unwrap();
    }
    assert_eq!(template.tree().live_nodes(), live);
    assert_eq!(template.tree().slot_count(), slots);
}

/// Tests that releasing a container drops its cached templates.
#[test]
fn test_release_drops_cache() {
    let mut template = common::template(r#"<div><ul id="l" data-list="items"><li/></ul></div>"#);
    template.inject(json!({"items": [1]})).unwrap();
    assert_eq!(template.cache().len(), 1);

    let list = template.tree().get_by_id("l").unwrap();
    template.release(list);
    assert!(template.cache().is_empty());
    template.tree_mut().destroy(list);
    assert_eq!(template.tree().to_markup(), "<div/>");
}

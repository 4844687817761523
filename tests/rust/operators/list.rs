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


//! # Tempa Operator Tests - List
//!
//! Repetition operators: `data-list` and `data-map`, template caching and
//! nested repetition.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test list
//! ```

#[path = "../common/mod.rs"]
mod common;

use serde_json::json;
use tempa::TpTree;

/// Tests that a list renders one clone per item.
#[test]
fn test_list_renders_items() {
    let html = common::render(
        r#"<ul data-list="items"><li data-text="."/></ul>"#,
        json!({"items": [1, 2, 3]}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<ul data-list="items"><li data-text=".">1</li><li data-text=".">2</li><li data-text=".">3</li></ul>"#
    );
}

/// Tests the implicit item operators: text for leaves, object otherwise.
#[test]
fn test_implicit_item_operators() {
    let html = common::render(
        r#"<div><ol data-list="tags"><li/></ol><ul data-list="users"><li><b data-text="name"/></li></ul></div>"#,
        json!({"tags": ["a", "b"], "users": [{"name": "Ada"}, {"name": "Alan"}]}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><ol data-list="tags"><li>a</li><li>b</li></ol><ul data-list="users"><li><b data-text="name">Ada</b></li><li><b data-text="name">Alan</b></li></ul></div>"#
    );
}

/// Tests that injecting twice replaces the items instead of appending.
#[test]
fn test_list_reinjection() {
    let mut template = common::template(r#"<ul data-list="items"><li data-text="."/></ul>"#);
    template.inject(json!({"items": [1, 2, 3]})).unwrap();
    template.inject(json!({"items": [1, 2, 3]})).unwrap();
    let root = template.tree().root();
    assert_eq!(template.tree().children(root).len(), 3);

    template.inject(json!({"items": []})).unwrap();
    assert_eq!(template.tree().to_markup(), r#"<ul data-list="items"/>"#);

    template.inject(json!({"items": ["x"]})).unwrap();
    assert_eq!(
        template.tree().to_markup(),
        r#"<ul data-list="items"><li data-text=".">x</li></ul>"#
    );
}

/// Tests that a container without item template violates the contract.
#[test]
fn test_missing_item_template() {
    let err = common::render(r#"<ul data-list="items"/>"#, json!({"items": [1]})).unwrap_err();
    assert!(err.is_contract());
}

/// Tests that a null list renders nothing and warns.
#[test]
fn test_null_list() {
    common::capture_logs();
    let html = common::render(r#"<ul data-list="items"><li/></ul>"#, json!({"items": null}))
        .unwrap();
    assert_eq!(html, r#"<ul data-list="items"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests that a non-sequence list value violates the contract.
#[test]
fn test_list_type_mismatch() {
    let err = common::render(r#"<ul data-list="items"><li/></ul>"#, json!({"items": "abc"}))
        .unwrap_err();
    assert!(err.is_contract());
}

/// Tests that null items clear their clone text with a warning.
#[test]
fn test_null_item() {
    common::capture_logs();
    let html = common::render(
        r#"<ul data-list="items"><li data-text="."/></ul>"#,
        json!({"items": [null, "x"]}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<ul data-list="items"><li data-text="."/><li data-text=".">x</li></ul>"#
    );
    assert_eq!(common::warnings().len(), 1);
}

/// Tests nested lists and their cache entries across re-injection.
#[test]
fn test_nested_lists() {
    let mut template = common::template(
        r#"<div data-list="rows"><ul data-list="cells"><li data-text="."/></ul></div>"#,
    );
    let model = json!({"rows": [{"cells": [1, 2]}, {"cells": [3]}]});
    template.inject(model.clone()).unwrap();
    assert_eq!(
        template.tree().to_markup(),
        r#"<div data-list="rows"><ul data-list="cells"><li data-text=".">1</li><li data-text=".">2</li></ul><ul data-list="cells"><li data-text=".">3</li></ul></div>"#
    );
    assert_eq!(template.cache().len(), 3);

    template.inject(model).unwrap();
    assert_eq!(template.cache().len(), 3);
}

/// Tests that a map renders key and value clones in model order.
#[test]
fn test_map_keeps_order() {
    let html = common::render(
        r#"<dl data-map="tags"><dt data-text="."/><dd data-text="."/></dl>"#,
        json!({"tags": {"b": 1, "a": 2}}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<dl data-map="tags"><dt data-text=".">b</dt><dd data-text=".">1</dd><dt data-text=".">a</dt><dd data-text=".">2</dd></dl>"#
    );
}

/// Tests map values that are objects.
#[test]
fn test_map_with_object_values() {
    let html = common::render(
        r#"<dl data-map="people"><dt/><dd><span data-text="age"/></dd></dl>"#,
        json!({"people": {"ada": {"age": 36}}}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<dl data-map="people"><dt>ada</dt><dd><span data-text="age">36</span></dd></dl>"#
    );
}

/// Tests map contract violations.
#[test]
fn test_map_contract() {
    let err = common::render(r#"<dl data-map="tags"><dt/></dl>"#, json!({"tags": {"a": 1}}))
        .unwrap_err();
    assert!(err.is_contract());
    let err = common::render(
        r#"<dl data-map="tags"><dt/><dd/></dl>"#,
        json!({"tags": [1, 2]}),
    )
    .unwrap_err();
    assert!(err.is_contract());
}

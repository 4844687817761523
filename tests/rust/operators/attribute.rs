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


//! # Tempa Operator Tests - Attribute
//!
//! Attribute operators: `data-attr`, `data-id`, `data-href`, `data-title`,
//! `data-src` and `data-value`.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test attribute
//! ```

#[path = "../common/mod.rs"]
mod common;

use serde_json::json;

/// Tests `attr` with several pairs and a numeric value.
#[test]
fn test_attr_pairs() {
    let html = common::render(
        r#"<a data-attr="href:url; title:caption;width:size"/>"#,
        json!({"url": "/x", "caption": "Go", "size": 40}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<a data-attr="href:url; title:caption;width:size" href="/x" title="Go" width="40"/>"#
    );
}

/// Tests that a null value removes the attribute with a warning.
#[test]
fn test_attr_null_removes() {
    common::capture_logs();
    let html = common::render(
        r#"<img alt="old" data-attr="alt:caption"/>"#,
        json!({"caption": null}),
    )
    .unwrap();
    assert_eq!(html, r#"<img data-attr="alt:caption"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests that a missing property only removes the attribute it feeds.
#[test]
fn test_attr_missing_property_removes_its_attribute() {
    common::capture_logs();
    let html = common::render(
        r#"<a href="h" title="t" data-attr="href:url;title:missing"/>"#,
        json!({"url": "/n"}),
    )
    .unwrap();
    assert_eq!(html, r#"<a href="/n" data-attr="href:url;title:missing"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests malformed `attr` operands.
#[test]
fn test_attr_contract() {
    for operand in ["href", "href:", ":url", ";"] {
        let markup = format!(r#"<a data-attr="{}"/>"#, operand);
        let err = common::render(&markup, json!({"url": "/"})).unwrap_err();
        assert!(err.is_contract(), "{} should be rejected", operand);
    }
}

/// Tests `id` accepting numbers.
#[test]
fn test_id_from_number() {
    let html = common::render(r#"<li data-id="id"/>"#, json!({"id": 7})).unwrap();
    assert_eq!(html, r#"<li data-id="id" id="7"/>"#);
}

/// Tests `href` and `title`, and that `href` rejects non-strings.
#[test]
fn test_href_and_title() {
    let html = common::render(
        r#"<a data-href="link.url" data-title="link.label"/>"#,
        json!({"link": {"url": "https://tempa.dev/?a=1&b=2", "label": "Docs"}}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<a data-href="link.url" data-title="link.label" href="https://tempa.dev/?a=1&amp;b=2" title="Docs"/>"#
    );

    let err = common::render(r#"<a data-href="url"/>"#, json!({"url": 5})).unwrap_err();
    assert!(err.is_contract());
}

/// Tests that a missing `href` property removes the attribute.
#[test]
fn test_href_missing_property() {
    common::capture_logs();
    let html = common::render(r#"<a href="/old" data-href="missing"/>"#, json!({})).unwrap();
    assert_eq!(html, r#"<a data-href="missing"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests `src` on a resource element and its tag restriction.
#[test]
fn test_src() {
    let html = common::render(r#"<img data-src="pic"/>"#, json!({"pic": "a.png"})).unwrap();
    assert_eq!(html, r#"<img data-src="pic" src="a.png"/>"#);

    let err = common::render(r#"<div data-src="pic"/>"#, json!({"pic": "a.png"})).unwrap_err();
    assert!(err.is_contract());
}

/// Tests `value` on input and textarea controls.
#[test]
fn test_value_on_input_and_textarea() {
    let html = common::render(
        r#"<form><input data-value="name"/><input data-value="age"/><textarea data-value="bio">old</textarea></form>"#,
        json!({"name": "Ada", "age": 36, "bio": "Hi"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<form><input data-value="name" value="Ada"/><input data-value="age" value="36"/><textarea data-value="bio">Hi</textarea></form>"#
    );
}

/// Tests `value` selecting the matching option.
#[test]
fn test_value_on_select() {
    let html = common::render(
        r#"<select data-value="color"><option value="r" selected="selected">Red</option><option value="g">Green</option><option>Blue</option></select>"#,
        json!({"color": "g"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<select data-value="color"><option value="r">Red</option><option value="g" selected="selected">Green</option><option>Blue</option></select>"#
    );

    let html = common::render(
        r#"<select data-value="color"><option value="r">Red</option><option>Blue</option></select>"#,
        json!({"color": "Blue"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<select data-value="color"><option value="r">Red</option><option selected="selected">Blue</option></select>"#
    );
}

/// Tests that a null value resets the control.
#[test]
fn test_value_null_resets() {
    common::capture_logs();
    let html = common::render(r#"<input value="x" data-value="name"/>"#, json!({"name": null}))
        .unwrap();
    assert_eq!(html, r#"<input data-value="name"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests that `value` only applies to form controls.
#[test]
fn test_value_requires_control() {
    let err = common::render(r#"<div data-value="name"/>"#, json!({"name": "x"})).unwrap_err();
    assert!(err.is_contract());
}

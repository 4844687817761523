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


//! # Tempa Operator Tests - Conditional
//!
//! Branch operators: `data-if`, `data-ifnot`, `data-case` and
//! `data-exclude`. A disabled branch gets the hidden class and its subtree
//! is left untouched.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test conditional
//! ```

#[path = "../common/mod.rs"]
mod common;

use serde_json::json;

/// Tests that a false `if` hides the element and skips its subtree.
#[test]
fn test_if_false_hides_subtree() {
    let html = common::render(
        r#"<div data-if="show"><p data-text="name">old</p></div>"#,
        json!({"show": false, "name": "new"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div data-if="show" class="hidden"><p data-text="name">old</p></div>"#
    );
}

/// Tests that a true branch removes a previously added hidden class.
#[test]
fn test_if_true_removes_hidden_class() {
    let html = common::render(
        r#"<p class="hidden" data-if="show" data-text="name"/>"#,
        json!({"show": "yes", "name": "Ada"}),
    )
    .unwrap();
    assert_eq!(html, r#"<p data-if="show" data-text="name">Ada</p>"#);

    let html = common::render(
        r#"<p class="lead hidden" data-if="show"/>"#,
        json!({"show": 1}),
    )
    .unwrap();
    assert_eq!(html, r#"<p class="lead" data-if="show"/>"#);
}

/// Tests `ifnot` against empty values.
#[test]
fn test_ifnot() {
    let html = common::render(
        r#"<div><p data-ifnot="items">none</p><p data-ifnot="name">named</p></div>"#,
        json!({"items": [], "name": "Ada"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><p data-ifnot="items">none</p><p data-ifnot="name" class="hidden">named</p></div>"#
    );
}

/// Tests `case` selecting one branch among siblings.
#[test]
fn test_case_selects_branch() {
    let html = common::render(
        r#"<div><p data-case="status:done">A</p><p data-case="status:open">B</p></div>"#,
        json!({"status": "done"}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><p data-case="status:done">A</p><p data-case="status:open" class="hidden">B</p></div>"#
    );
}

/// Tests that `case` compares numbers by their display form.
#[test]
fn test_case_with_number() {
    let html = common::render(r#"<p data-case="level:3"/>"#, json!({"level": 3})).unwrap();
    assert_eq!(html, r#"<p data-case="level:3"/>"#);
}

/// Tests that a null `case` value disables the branch with a warning.
#[test]
fn test_case_null_warns() {
    common::capture_logs();
    let html = common::render(r#"<p data-case="status:done"/>"#, json!({"status": null})).unwrap();
    assert_eq!(html, r#"<p data-case="status:done" class="hidden"/>"#);
    assert_eq!(common::warnings().len(), 1);
}

/// Tests `case` contract violations.
#[test]
fn test_case_contract() {
    let err = common::render(r#"<p data-case="flag:true"/>"#, json!({"flag": true})).unwrap_err();
    assert!(err.is_contract());
    let err = common::render(r#"<p data-case="status"/>"#, json!({"status": "x"})).unwrap_err();
    assert!(err.is_contract());
    let err = common::render(r#"<p data-case="status:"/>"#, json!({"status": "x"})).unwrap_err();
    assert!(err.is_contract());
}

/// Tests `exclude` operand handling.
#[test]
fn test_exclude() {
    let html = common::render(
        r#"<div><p data-exclude="true"/><p data-exclude="TRUE"/><p data-exclude="false"/></div>"#,
        json!({}),
    )
    .unwrap();
    assert_eq!(
        html,
        r#"<div><p data-exclude="true" class="hidden"/><p data-exclude="TRUE" class="hidden"/><p data-exclude="false"/></div>"#
    );
}

/// Tests that an element may declare a single conditional.
#[test]
fn test_two_conditionals_violate_contract() {
    let err = common::render(r#"<p data-if="a" data-ifnot="b"/>"#, json!({"a": 1, "b": 2}))
        .unwrap_err();
    assert!(err.is_contract());
}

/// Tests that a missing property disables the branch with a warning.
#[test]
fn test_missing_property_hides() {
    common::capture_logs();
    let html = common::render(r#"<p data-if="missing">a</p>"#, json!({})).unwrap();
    assert_eq!(html, r#"<p data-if="missing" class="hidden">a</p>"#);
    let warnings = common::warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("missing"));
}

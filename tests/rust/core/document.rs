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

//! # Tempa Core Tests - Document
//!
//! Arena document parsing, mutation and serialization.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test document
//! ```

use std::io::Write;

use tempa::{TpDocument, TpError, TpTree};

/// Tests that compact markup survives a parse/serialize cycle.
#[test]
fn test_markup_is_preserved() {
    let markup = r#"<section id="main"><h1 class="title">News &amp; notes</h1><p/><!--x--></section>"#;
    let doc = TpDocument::parse(markup).unwrap();
    assert_eq!(doc.to_markup(), markup);
}

/// Tests that whitespace between inline elements survives while
/// line-broken indentation is dropped.
#[test]
fn test_inline_whitespace_is_preserved() {
    let doc = TpDocument::parse("<p><b>a</b> <i>b</i></p>").unwrap();
    assert_eq!(doc.to_markup(), "<p><b>a</b> <i>b</i></p>");

    let doc = TpDocument::parse("<ul>\n  <li>1</li>\n  <li>2</li>\n</ul>").unwrap();
    assert_eq!(doc.to_markup(), "<ul><li>1</li><li>2</li></ul>");
}

/// Tests that a destroyed node's slot is reused without reviving old handles.
#[test]
fn test_stale_handles_stay_dead_after_slot_reuse() {
    let mut doc = TpDocument::parse(r#"<ul><li id="old"/></ul>"#).unwrap();
    let root = doc.root();
    let old = doc.get_by_id("old").unwrap();
    doc.destroy(old);

    let fresh = doc.create_element("li");
    doc.append_child(root, fresh);
    assert_eq!(fresh.index, old.index);
    assert_ne!(fresh.generation, old.generation);
    assert!(!doc.contains(old));
    assert!(doc.contains(fresh));
    assert_eq!(doc.tag(old), "");
    assert_eq!(doc.to_markup(), "<ul><li/></ul>");
}

/// Tests attribute escaping on output.
#[test]
fn test_attribute_values_are_escaped() {
    let mut doc = TpDocument::new("a");
    let root = doc.root();
    doc.set_attr(root, "title", "say \"hi\" & <bye>");
    assert_eq!(
        doc.to_markup(),
        r#"<a title="say &quot;hi&quot; &amp; &lt;bye&gt;"/>"#
    );
}

/// Tests lookup by id over attached elements only.
#[test]
fn test_get_by_id() {
    let mut doc = TpDocument::parse(r#"<div><p id="a"/><p id="b"/></div>"#).unwrap();
    let b = doc.get_by_id("b").unwrap();
    assert_eq!(doc.tag(b), "p");
    doc.detach(b);
    assert_eq!(doc.get_by_id("b"), None);
    assert!(doc.get_by_id("a").is_some());
}

/// Tests replacing content with parsed markup.
#[test]
fn test_set_html() {
    let mut doc = TpDocument::parse("<div>old<i/></div>").unwrap();
    let root = doc.root();
    doc.set_html(root, "<b>new</b> text").unwrap();
    assert_eq!(doc.to_markup(), "<div><b>new</b> text</div>");
    assert!(matches!(doc.set_html(root, "<b>"), Err(TpError::Markup(_))));
}

/// Tests CSS class helpers.
#[test]
fn test_css_classes() {
    let mut doc = TpDocument::parse(r#"<p class="a"/>"#).unwrap();
    let root = doc.root();
    doc.add_css_class(root, "hidden");
    doc.add_css_class(root, "hidden");
    assert_eq!(doc.get_attr(root, "class"), Some("a hidden"));
    assert!(doc.has_css_class(root, "hidden"));
    doc.remove_css_class(root, "hidden");
    assert_eq!(doc.get_attr(root, "class"), Some("a"));
    doc.remove_css_class(root, "a");
    assert_eq!(doc.get_attr(root, "class"), None);
}

/// Tests detaching and re-appending keeps the subtree.
#[test]
fn test_detach_and_append() {
    let mut doc = TpDocument::parse("<ul><li>1</li><li>2</li></ul>").unwrap();
    let root = doc.root();
    let first = doc.first_child(root).unwrap();
    doc.detach(first);
    assert_eq!(doc.to_markup(), "<ul><li>2</li></ul>");
    doc.append_child(root, first);
    assert_eq!(doc.to_markup(), "<ul><li>2</li><li>1</li></ul>");
}

/// Tests that a document needs exactly one root element.
#[test]
fn test_root_element_rules() {
    assert!(matches!(TpDocument::parse("<a/><b/>"), Err(TpError::Markup(_))));
    assert!(matches!(TpDocument::parse("just text"), Err(TpError::Markup(_))));
    let doc = TpDocument::parse("<?xml version=\"1.0\"?>\n<!-- lead -->\n<a/>").unwrap();
    assert_eq!(doc.to_markup(), "<a/>");
}

/// Tests loading a template from disk.
#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    write!(file, "<html>\n  <body data-text=\"title\"/>\n</html>\n").unwrap();
    let doc = TpDocument::from_file(file.path()).unwrap();
    assert_eq!(doc.to_markup(), "<html><body data-text=\"title\"/></html>");

    let missing = TpDocument::from_file(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(TpError::Io(_))));
}

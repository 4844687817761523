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

//! # Markup Serializer
//!
//! Compact serialization of arena nodes. Elements without children are
//! written self-closing. Text escapes `&`, `<` and `>`; attribute values
//! additionally escape `"`.

use crate::dom::{TpDocument, TpNodeId, TpNodeKind};

/// Appends the markup of `node` and its subtree to `out`.
pub fn write_node(doc: &TpDocument, node: TpNodeId, out: &mut String) {
    let Some(data) = doc.node(node) else {
        return;
    };
    match &data.kind {
        TpNodeKind::Text(text) => escape_text(text, out),
        TpNodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        TpNodeKind::Element { name, attributes } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            if data.children.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for child in &data.children {
                write_node(doc, *child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

pub fn escape_text(text: &str, out: &mut String) {
    escape(text, false, out);
}

pub fn escape_attr(value: &str, out: &mut String) {
    escape(value, true, out);
}

fn escape(input: &str, escape_quotes: bool, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if escape_quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

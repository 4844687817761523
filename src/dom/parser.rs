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

//! # Markup Parser
//!
//! Builds arena nodes from well-formed markup using `quick-xml` events.
//!
//! Text is accumulated across text, CDATA and entity events and flushed as a
//! single text node at the next element boundary. Whitespace-only runs that
//! span a line break are dropped so indentation in template files does not
//! produce text nodes; inline runs such as the space in `<b>a</b> <i>b</i>`
//! are kept.
//! Declarations, processing instructions and doctypes are skipped.

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::dom::{TpDocument, TpNodeId, TpTree};
use crate::errors::{Result, TpError};

/// Parses `markup` into detached top-level nodes owned by `doc`.
pub fn parse_nodes(doc: &mut TpDocument, markup: &str) -> Result<Vec<TpNodeId>> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut top_level = Vec::new();
    let mut open: Vec<TpNodeId> = Vec::new();
    let mut pending = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                flush_text(doc, &mut pending, open.last().copied(), &mut top_level);
                let element = create_element(doc, &e)?;
                attach(doc, open.last().copied(), element, &mut top_level);
                open.push(element);
            }
            Event::Empty(e) => {
                flush_text(doc, &mut pending, open.last().copied(), &mut top_level);
                let element = create_element(doc, &e)?;
                attach(doc, open.last().copied(), element, &mut top_level);
            }
            Event::End(_) => {
                flush_text(doc, &mut pending, open.last().copied(), &mut top_level);
                open.pop();
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|e| TpError::markup(e.to_string()))?;
                pending.push_str(&text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())
                    .map_err(|e| TpError::markup(e.to_string()))?;
                pending.push_str(text);
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| TpError::markup(e.to_string()))?;
                pending.push_str(&resolve_entity(&raw)?);
            }
            Event::Comment(e) => {
                flush_text(doc, &mut pending, open.last().copied(), &mut top_level);
                let text = std::str::from_utf8(e.as_ref())
                    .map_err(|e| TpError::markup(e.to_string()))?;
                let comment = doc.create_comment(text);
                attach(doc, open.last().copied(), comment, &mut top_level);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !open.is_empty() {
        return Err(TpError::markup(format!(
            "unclosed element <{}>",
            doc.tag(open[open.len() - 1])
        )));
    }
    flush_text(doc, &mut pending, None, &mut top_level);
    Ok(top_level)
}

fn create_element(doc: &mut TpDocument, start: &BytesStart<'_>) -> Result<TpNodeId> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| TpError::markup(e.to_string()))?
        .to_string();
    let element = doc.create_element(&name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| TpError::markup(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| TpError::markup(e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| TpError::markup(e.to_string()))?;
        doc.set_attr(element, &key, &value);
    }
    Ok(element)
}

fn attach(
    doc: &mut TpDocument,
    parent: Option<TpNodeId>,
    node: TpNodeId,
    top_level: &mut Vec<TpNodeId>,
) {
    match parent {
        Some(parent) => doc.append_child(parent, node),
        None => top_level.push(node),
    }
}

fn flush_text(
    doc: &mut TpDocument,
    pending: &mut String,
    parent: Option<TpNodeId>,
    top_level: &mut Vec<TpNodeId>,
) {
    if pending.trim().is_empty() && pending.contains('\n') {
        pending.clear();
        return;
    }
    let text = doc.create_text(pending);
    pending.clear();
    attach(doc, parent, text, top_level);
}

fn resolve_entity(raw: &str) -> Result<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16)
                .map_err(|_| TpError::markup(format!("invalid hex entity: #{}", rest)))?,
            None => rest
                .parse::<u32>()
                .map_err(|_| TpError::markup(format!("invalid decimal entity: #{}", rest)))?,
        };
        let ch = char::from_u32(code)
            .ok_or_else(|| TpError::markup(format!("invalid code point: {}", code)))?;
        return Ok(ch.to_string());
    }

    // Unknown named entities are kept literally.
    Ok(format!("&{};", raw))
}

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

//! # Element Tree Capability
//!
//! The injection engine never touches a concrete document type. It works
//! against the [`TpTree`] trait, which describes the handful of element
//! operations the operators need: attribute access, text and markup content,
//! child management, deep cloning, detaching and id lookup.
//!
//! Elements are addressed through [`TpNodeId`] handles. Handles are plain
//! copies; the tree owns every node, and anything else (the template cache
//! for instance) only remembers handles.
//!
//! [`TpDocument`] is the bundled arena implementation. It parses
//! well-formed markup and serializes back to a string.
//!
//! "Children" in this trait always means *element* children. Text and
//! comment nodes are reachable only through the text accessors and are
//! removed together with the element children by
//! [`TpTree::remove_children`].

pub mod document;
pub mod parser;
pub mod serialize;

pub use document::{TpDocument, TpNode, TpNodeKind};

use crate::errors::Result;

/// Generational handle of a node inside a [`TpTree`].
///
/// Slots are reused once their node is destroyed; the generation tells a
/// stale handle apart from the node that took its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TpNodeId {
    pub index: u32,
    pub generation: u32,
}

impl TpNodeId {
    pub const INVALID: TpNodeId = TpNodeId {
        index: u32::MAX,
        generation: 0,
    };
}

/// Element operations consumed by the injection engine.
pub trait TpTree {
    /// Document root element.
    fn root(&self) -> TpNodeId;

    /// Attached element whose `id` attribute equals `id`.
    fn get_by_id(&self, id: &str) -> Option<TpNodeId>;

    /// Tag name, empty for non-element nodes.
    fn tag(&self, node: TpNodeId) -> &str;

    /// Attributes in declaration order.
    fn attributes(&self, node: TpNodeId) -> Vec<(String, String)>;

    fn get_attr(&self, node: TpNodeId, name: &str) -> Option<&str>;

    fn has_attr(&self, node: TpNodeId, name: &str) -> bool {
        self.get_attr(node, name).is_some()
    }

    fn set_attr(&mut self, node: TpNodeId, name: &str, value: &str);

    fn remove_attr(&mut self, node: TpNodeId, name: &str);

    /// Concatenated direct text content.
    fn get_text(&self, node: TpNodeId) -> String;

    /// Replaces the direct text content, leaving element children alone.
    fn set_text(&mut self, node: TpNodeId, text: &str);

    /// Removes every direct text node.
    fn remove_text(&mut self, node: TpNodeId);

    /// Replaces all children with the parsed `markup`.
    fn set_html(&mut self, node: TpNodeId, markup: &str) -> Result<()>;

    /// Element children, in order.
    fn children(&self, node: TpNodeId) -> Vec<TpNodeId>;

    fn first_child(&self, node: TpNodeId) -> Option<TpNodeId>;

    fn has_children(&self, node: TpNodeId) -> bool {
        self.first_child(node).is_some()
    }

    /// Destroys every child node, text included.
    fn remove_children(&mut self, node: TpNodeId);

    /// Detached deep copy of `node`.
    fn clone_deep(&mut self, node: TpNodeId) -> TpNodeId;

    /// Unlinks `node` from its parent without destroying it.
    fn detach(&mut self, node: TpNodeId);

    fn append_child(&mut self, parent: TpNodeId, child: TpNodeId);

    /// Unlinks and frees `node` and its whole subtree.
    fn destroy(&mut self, node: TpNodeId);

    /// Locator used in diagnostics, e.g. `/html/body/ul/li[2]`.
    fn trace(&self, node: TpNodeId) -> String;

    fn has_css_class(&self, node: TpNodeId, class: &str) -> bool {
        self.get_attr(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_css_class(&mut self, node: TpNodeId, class: &str) {
        if self.has_css_class(node, class) {
            return;
        }
        let updated = match self.get_attr(node, "class").map(str::trim) {
            Some(current) if !current.is_empty() => format!("{} {}", current, class),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &updated);
    }

    fn remove_css_class(&mut self, node: TpNodeId, class: &str) {
        if !self.has_css_class(node, class) {
            return;
        }
        let remaining: Vec<String> = self
            .get_attr(node, "class")
            .unwrap_or("")
            .split_whitespace()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if remaining.is_empty() {
            self.remove_attr(node, "class");
        } else {
            self.set_attr(node, "class", &remaining.join(" "));
        }
    }
}

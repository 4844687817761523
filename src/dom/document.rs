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

//! # Arena Document
//!
//! [`TpDocument`] stores every node in a `Vec` of slots and hands out
//! generational [`TpNodeId`] handles into it. Destroying a node frees its
//! slot and bumps the slot generation; the next allocation reuses the slot
//! from the free list. A stale handle keeps the old generation, so it no
//! longer resolves and never aliases the node now living in the slot.
//!
//! Detached nodes (cached list templates, fresh clones) live in the same
//! arena with no parent; they are only serialized or found by id once they
//! are appended below the root.

use std::fs;
use std::path::Path;

use crate::dom::{parser, serialize, TpNodeId, TpTree};
use crate::errors::{Result, TpError};

/// Payload of one arena slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TpNodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug)]
pub struct TpNode {
    pub kind: TpNodeKind,
    pub parent: Option<TpNodeId>,
    pub children: Vec<TpNodeId>,
}

impl TpNode {
    fn new(kind: TpNodeKind) -> Self {
        TpNode {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, TpNodeKind::Element { .. })
    }
}

/// Arena-backed markup document.
#[derive(Clone, Debug)]
enum Slot {
    Occupied { generation: u32, node: TpNode },
    Free { next_generation: u32 },
}

#[derive(Clone, Debug)]
pub struct TpDocument {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: TpNodeId,
}

impl TpDocument {
    /// Creates a document holding a single empty root element.
    pub fn new(root_tag: &str) -> Self {
        let mut doc = Self::empty();
        doc.root = doc.create_element(root_tag);
        doc
    }

    /// Parses well-formed markup with exactly one top-level element.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut doc = Self::empty();
        let top_level = parser::parse_nodes(&mut doc, markup)?;

        let mut root = None;
        for node in top_level {
            if doc.is_element(node) {
                if root.is_some() {
                    return Err(TpError::markup("document has more than one root element"));
                }
                root = Some(node);
            } else {
                doc.destroy(node);
            }
        }
        doc.root = root.ok_or_else(|| TpError::markup("document has no root element"))?;
        Ok(doc)
    }

    /// Reads and parses a markup file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let markup = fs::read_to_string(path)?;
        Self::parse(&markup)
    }

    /// Serializes the whole document.
    pub fn to_markup(&self) -> String {
        self.node_markup(self.root)
    }

    /// Serializes one node and its subtree, attached or not.
    pub fn node_markup(&self, node: TpNodeId) -> String {
        let mut out = String::new();
        serialize::write_node(self, node, &mut out);
        out
    }

    /// Allocates a detached element.
    pub fn create_element(&mut self, tag: &str) -> TpNodeId {
        self.alloc(TpNode::new(TpNodeKind::Element {
            name: tag.to_string(),
            attributes: Vec::new(),
        }))
    }

    /// Allocates a detached text node.
    pub fn create_text(&mut self, text: &str) -> TpNodeId {
        self.alloc(TpNode::new(TpNodeKind::Text(text.to_string())))
    }

    /// Allocates a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> TpNodeId {
        self.alloc(TpNode::new(TpNodeKind::Comment(text.to_string())))
    }

    fn empty() -> Self {
        TpDocument {
            slots: Vec::new(),
            free_list: Vec::new(),
            root: TpNodeId::INVALID,
        }
    }

    /// Live node behind `id`, `None` for freed or stale handles.
    pub fn node(&self, id: TpNodeId) -> Option<&TpNode> {
        match self.slots.get(id.index as usize) {
            Some(Slot::Occupied { generation, node }) if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: TpNodeId) -> Option<&mut TpNode> {
        match self.slots.get_mut(id.index as usize) {
            Some(Slot::Occupied { generation, node }) if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    /// Whether the handle still refers to a live node.
    pub fn contains(&self, id: TpNodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn is_element(&self, id: TpNodeId) -> bool {
        self.node(id).map(TpNode::is_element).unwrap_or(false)
    }

    pub fn parent(&self, id: TpNodeId) -> Option<TpNodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// All child nodes, text and comments included.
    pub fn child_nodes(&self, id: TpNodeId) -> &[TpNodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes in the arena, detached ones included.
    pub fn live_nodes(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied { .. }))
            .count()
    }

    /// Number of arena slots, free ones included. Bounded by the peak
    /// number of live nodes.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn alloc(&mut self, node: TpNode) -> TpNodeId {
        if let Some(index) = self.free_list.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                let generation = match slot {
                    Slot::Free { next_generation } => *next_generation,
                    Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                };
                *slot = Slot::Occupied { generation, node };
                return TpNodeId { index, generation };
            }
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied { generation: 0, node });
        TpNodeId {
            index,
            generation: 0,
        }
    }

    fn attributes_mut(&mut self, id: TpNodeId) -> Option<&mut Vec<(String, String)>> {
        match self.node_mut(id).map(|n| &mut n.kind) {
            Some(TpNodeKind::Element { attributes, .. }) => Some(attributes),
            _ => None,
        }
    }

    fn is_text(&self, id: TpNodeId) -> bool {
        matches!(self.node(id).map(|n| &n.kind), Some(TpNodeKind::Text(_)))
    }

    /// Removes `child` from the children list of its parent, if any.
    fn unlink(&mut self, child: TpNodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    fn free_subtree(&mut self, id: TpNodeId) {
        let next_generation = match self.slots.get(id.index as usize) {
            Some(Slot::Occupied { generation, .. }) if *generation == id.generation => {
                generation.wrapping_add(1)
            }
            _ => return,
        };
        let freed = std::mem::replace(
            &mut self.slots[id.index as usize],
            Slot::Free { next_generation },
        );
        self.free_list.push(id.index);
        if let Slot::Occupied { node, .. } = freed {
            for child in node.children {
                self.free_subtree(child);
            }
        }
    }

    fn copy_subtree(&mut self, id: TpNodeId, parent: Option<TpNodeId>) -> Option<TpNodeId> {
        let source = self.node(id)?;
        let kind = source.kind.clone();
        let children = source.children.clone();

        let copy = self.alloc(TpNode {
            kind,
            parent,
            children: Vec::new(),
        });
        let copied: Vec<TpNodeId> = children
            .into_iter()
            .filter_map(|child| self.copy_subtree(child, Some(copy)))
            .collect();
        if let Some(node) = self.node_mut(copy) {
            node.children = copied;
        }
        Some(copy)
    }

    /// Zero based position among same-name siblings, only when there are twins.
    fn twin_index(&self, id: TpNodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let name = self.tag(id);
        let twins: Vec<TpNodeId> = self
            .child_nodes(parent)
            .iter()
            .copied()
            .filter(|c| self.tag(*c) == name)
            .collect();
        if twins.len() > 1 {
            twins.iter().position(|c| *c == id)
        } else {
            None
        }
    }
}

impl TpTree for TpDocument {
    fn root(&self) -> TpNodeId {
        self.root
    }

    fn get_by_id(&self, id: &str) -> Option<TpNodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.get_attr(node, "id") == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        None
    }

    fn tag(&self, node: TpNodeId) -> &str {
        match self.node(node).map(|n| &n.kind) {
            Some(TpNodeKind::Element { name, .. }) => name,
            _ => "",
        }
    }

    fn attributes(&self, node: TpNodeId) -> Vec<(String, String)> {
        match self.node(node).map(|n| &n.kind) {
            Some(TpNodeKind::Element { attributes, .. }) => attributes.clone(),
            _ => Vec::new(),
        }
    }

    fn get_attr(&self, node: TpNodeId, name: &str) -> Option<&str> {
        match self.node(node).map(|n| &n.kind) {
            Some(TpNodeKind::Element { attributes, .. }) => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    fn set_attr(&mut self, node: TpNodeId, name: &str, value: &str) {
        if let Some(attributes) = self.attributes_mut(node) {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn remove_attr(&mut self, node: TpNodeId, name: &str) {
        if let Some(attributes) = self.attributes_mut(node) {
            attributes.retain(|(key, _)| key != name);
        }
    }

    fn get_text(&self, node: TpNodeId) -> String {
        self.child_nodes(node)
            .iter()
            .filter_map(|c| match self.node(*c).map(|n| &n.kind) {
                Some(TpNodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn set_text(&mut self, node: TpNodeId, text: &str) {
        if text.is_empty() {
            self.remove_text(node);
            return;
        }
        let texts: Vec<TpNodeId> = self
            .child_nodes(node)
            .iter()
            .copied()
            .filter(|c| self.is_text(*c))
            .collect();

        match texts.split_first() {
            Some((first, rest)) => {
                if let Some(n) = self.node_mut(*first) {
                    n.kind = TpNodeKind::Text(text.to_string());
                }
                for extra in rest {
                    self.destroy(*extra);
                }
            }
            None => {
                let fresh = self.create_text(text);
                self.append_child(node, fresh);
            }
        }
    }

    fn remove_text(&mut self, node: TpNodeId) {
        let texts: Vec<TpNodeId> = self
            .child_nodes(node)
            .iter()
            .copied()
            .filter(|c| self.is_text(*c))
            .collect();
        for text in texts {
            self.destroy(text);
        }
    }

    fn set_html(&mut self, node: TpNodeId, markup: &str) -> Result<()> {
        let fragment = parser::parse_nodes(self, markup)?;
        self.remove_children(node);
        for child in fragment {
            self.append_child(node, child);
        }
        Ok(())
    }

    fn children(&self, node: TpNodeId) -> Vec<TpNodeId> {
        self.child_nodes(node)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    fn first_child(&self, node: TpNodeId) -> Option<TpNodeId> {
        self.child_nodes(node)
            .iter()
            .copied()
            .find(|c| self.is_element(*c))
    }

    fn remove_children(&mut self, node: TpNodeId) {
        let children = match self.node_mut(node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
    }

    fn clone_deep(&mut self, node: TpNodeId) -> TpNodeId {
        // Stale handles clone to an empty text node.
        match self.copy_subtree(node, None) {
            Some(copy) => copy,
            None => self.create_text(""),
        }
    }

    fn detach(&mut self, node: TpNodeId) {
        self.unlink(node);
    }

    fn append_child(&mut self, parent: TpNodeId, child: TpNodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        self.unlink(child);
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
    }

    fn destroy(&mut self, node: TpNodeId) {
        self.unlink(node);
        self.free_subtree(node);
    }

    fn trace(&self, node: TpNodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let mut segment = format!("/{}", self.tag(id));
            if let Some(index) = self.twin_index(id) {
                segment.push_str(&format!("[{}]", index));
            }
            segments.push(segment);
            current = self.parent(id);
        }
        segments.reverse();
        segments.concat()
    }
}

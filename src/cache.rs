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

//! # Template Cache
//!
//! Side table of per-element state kept between injections. Repetition
//! operators detach their item (or key and value) templates on first run and
//! store the detached handles here; later runs clone from the cached
//! fragments. The `HTML` operator records that the current children of an
//! element were produced from markup.
//!
//! Entries are keyed by element handle and dropped, with their fragments
//! destroyed, when the element leaves the tree.

use std::collections::HashMap;

use crate::dom::{TpNodeId, TpTree};

/// State remembered for one container element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TpElementData {
    pub item_template: Option<TpNodeId>,
    pub key_template: Option<TpNodeId>,
    pub value_template: Option<TpNodeId>,
    pub html_children: bool,
}

impl TpElementData {
    fn fragments(&self) -> impl Iterator<Item = TpNodeId> {
        [self.item_template, self.key_template, self.value_template]
            .into_iter()
            .flatten()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TpUserData {
    entries: HashMap<TpNodeId, TpElementData>,
}

impl TpUserData {
    pub fn new() -> Self {
        TpUserData::default()
    }

    pub fn get(&self, element: TpNodeId) -> Option<&TpElementData> {
        self.entries.get(&element)
    }

    pub fn entry(&mut self, element: TpNodeId) -> &mut TpElementData {
        self.entries.entry(element).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the state of `element` and of its element descendants,
    /// destroying every cached fragment.
    pub fn release_subtree<T: TpTree + ?Sized>(&mut self, tree: &mut T, element: TpNodeId) {
        if self.entries.is_empty() {
            return;
        }
        let mut stack = vec![element];
        while let Some(node) = stack.pop() {
            if let Some(data) = self.entries.remove(&node) {
                for fragment in data.fragments() {
                    tree.destroy(fragment);
                }
            }
            stack.extend(tree.children(node));
        }
    }

    /// Releases every child of `element`, then removes them from the tree.
    pub fn clear_children<T: TpTree + ?Sized>(&mut self, tree: &mut T, element: TpNodeId) {
        for child in tree.children(element) {
            self.release_subtree(tree, child);
        }
        tree.remove_children(element);
    }
}

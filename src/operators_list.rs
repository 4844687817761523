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

//! # Operators List
//!
//! Per-element view of the directives an element carries, rebuilt on every
//! visit. Jump, conditional, inline and content operators are exclusive:
//! an element holds at most one of each. Attribute operators accumulate in
//! declaration order.
//!
//! Three initializers exist because the same element is read differently
//! depending on how the injector reached it:
//!
//! - [`TpOperatorsList::init_element`] for ordinary tree walking;
//! - [`TpOperatorsList::init_item`] for clones produced by the repetition
//!   operators, which get an implicit content operator;
//! - [`TpOperatorsList::init_subtree`] for the element passed to
//!   `inject_subtree`, whose content operator is re-targeted at the
//!   injected value itself.

use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpError};
use crate::opcode::{TpOpcode, TpOpcodeType};

/// One decoded directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TpOperatorMeta {
    pub opcode: TpOpcode,
    pub operand: String,
}

impl TpOperatorMeta {
    pub fn new(opcode: TpOpcode, operand: impl Into<String>) -> Self {
        TpOperatorMeta {
            opcode,
            operand: operand.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TpOperatorsList {
    jump: Option<TpOperatorMeta>,
    conditional: Option<TpOperatorMeta>,
    // No opcode maps to the inline category yet.
    inline: Option<TpOperatorMeta>,
    content: Option<TpOperatorMeta>,
    attributes: Vec<TpOperatorMeta>,
}

impl TpOperatorsList {
    /// Scans the attributes of `element` once and routes every directive
    /// into its slot.
    pub fn init_element<T: TpTree + ?Sized>(
        tree: &T,
        element: TpNodeId,
        prefix: &str,
    ) -> Result<Self> {
        let mut list = TpOperatorsList::default();

        for (name, value) in tree.attributes(element) {
            let opcode = TpOpcode::from_attr_name_with_prefix(&name, prefix);
            if opcode == TpOpcode::None {
                continue;
            }
            if value.is_empty() {
                return Err(TpError::contract(
                    "OperatorsList#init_element",
                    format!(
                        "empty operand on element |{}| for opcode |{}|",
                        tree.trace(element),
                        opcode
                    ),
                ));
            }

            let meta = TpOperatorMeta::new(opcode, value);
            let category = opcode.category();
            let slot = match category {
                TpOpcodeType::Jump => &mut list.jump,
                TpOpcodeType::Conditional => &mut list.conditional,
                TpOpcodeType::Content => &mut list.content,
                TpOpcodeType::Attribute => {
                    list.attributes.push(meta);
                    continue;
                }
                TpOpcodeType::None => continue,
            };
            if slot.is_some() {
                return Err(TpError::contract(
                    "OperatorsList#init_element",
                    format!(
                        "element |{}| declares more than one {} operator",
                        tree.trace(element),
                        category
                    ),
                ));
            }
            *slot = Some(meta);
        }
        Ok(list)
    }

    /// Initializer for repetition clones. Without an explicit content
    /// operator the clone gets `OBJECT "."` when it has element children,
    /// `TEXT "."` otherwise.
    pub fn init_item<T: TpTree + ?Sized>(
        tree: &T,
        element: TpNodeId,
        prefix: &str,
    ) -> Result<Self> {
        let mut list = Self::init_element(tree, element, prefix)?;
        list.inline = None;
        if list.content.is_none() {
            let opcode = if tree.has_children(element) {
                TpOpcode::Object
            } else {
                TpOpcode::Text
            };
            list.content = Some(TpOperatorMeta::new(opcode, "."));
        }
        Ok(list)
    }

    /// Initializer for the root of a subtree injection. The content operator
    /// is forced to `.`, and must not be a terminal text operator.
    pub fn init_subtree<T: TpTree + ?Sized>(
        tree: &T,
        element: TpNodeId,
        prefix: &str,
    ) -> Result<Self> {
        let mut list = Self::init_element(tree, element, prefix)?;

        if let Some(content) = list.content.as_mut() {
            if matches!(
                content.opcode,
                TpOpcode::Text | TpOpcode::Html | TpOpcode::Numbering
            ) {
                return Err(TpError::contract(
                    "OperatorsList#init_subtree",
                    format!("subtree initializer forbids {} operator", content.opcode),
                ));
            }
            content.operand = ".".to_string();
            return Ok(list);
        }
        if let Some(inline) = list.inline.as_mut() {
            inline.operand = ".".to_string();
            return Ok(list);
        }
        Err(TpError::contract(
            "OperatorsList#init_subtree",
            format!(
                "subtree root |{}| mandates a content operator",
                tree.trace(element)
            ),
        ))
    }

    pub fn jump(&self) -> Option<&TpOperatorMeta> {
        self.jump.as_ref()
    }

    pub fn conditional(&self) -> Option<&TpOperatorMeta> {
        self.conditional.as_ref()
    }

    pub fn inline(&self) -> Option<&TpOperatorMeta> {
        self.inline.as_ref()
    }

    pub fn content(&self) -> Option<&TpOperatorMeta> {
        self.content.as_ref()
    }

    /// Attribute operators in declaration order.
    pub fn attributes(&self) -> &[TpOperatorMeta] {
        &self.attributes
    }

    pub fn has_jump(&self) -> bool {
        self.jump.is_some()
    }

    pub fn has_conditional(&self) -> bool {
        self.conditional.is_some()
    }

    pub fn has_inline(&self) -> bool {
        self.inline.is_some()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

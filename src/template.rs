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

//! # Template Injector
//!
//! [`TpTemplate`] walks an element tree and runs the operators declared on
//! every element against a model.
//!
//! ## Per-element Algorithm
//!
//! 1. **Jump**: a `GOTO` redirects processing to the element with the
//!    returned id, re-reading that element's operators.
//! 2. **Conditional**: a false branch adds the hidden class and skips the
//!    element and its whole subtree; a true branch removes the class.
//! 3. **Inline**: reserved category, executed alone when present.
//! 4. **Attributes**: every attribute operator, in declaration order.
//! 5. **Content**: the content operator may produce a new scope for the
//!    children. Terminal operators (text, markup, repetition) produce none
//!    and processing of the element stops there.
//! 6. **Children**: each element child is processed with the current scope.
//!
//! ## Injection Passes
//!
//! Every call to [`TpTemplate::inject`] or [`TpTemplate::inject_subtree`]
//! runs one [`TpInjection`], which borrows the tree, the template cache and
//! the formatter registry, and owns the index stack of the ordered
//! repetition operators. Templates cached by repetition operators outlive
//! passes, so re-injecting a model replaces the previous rendering instead
//! of appending to it.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tempa::dom::TpDocument;
//! use tempa::template::TpTemplate;
//!
//! let doc = TpDocument::parse(r#"<ul data-list=".items"><li data-text="."/></ul>"#).unwrap();
//! let mut template = TpTemplate::new(doc);
//! template.inject(json!({"items": [1, 2]})).unwrap();
//! assert_eq!(
//!     template.tree().to_markup(),
//!     r#"<ul data-list=".items"><li data-text=".">1</li><li data-text=".">2</li></ul>"#
//! );
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use crate::cache::TpUserData;
use crate::config::TpTemplateConfig;
use crate::content::{type_name, TpContent};
use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpError};
use crate::format::{TpFormat, TpFormats};
use crate::index::TpIndexStack;
use crate::operator::{execute_operator, TpOutcome};
use crate::operators_list::TpOperatorsList;

/// Injection engine bound to one element tree.
#[derive(Debug)]
pub struct TpTemplate<T: TpTree> {
    tree: T,
    cache: TpUserData,
    formats: TpFormats,
    config: TpTemplateConfig,
}

impl<T: TpTree> TpTemplate<T> {
    pub fn new(tree: T) -> Self {
        TpTemplate {
            tree,
            cache: TpUserData::new(),
            formats: TpFormats::new(),
            config: TpTemplateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TpTemplateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_formats(mut self, formats: TpFormats) -> Self {
        self.formats = formats;
        self
    }

    pub fn config(&self) -> &TpTemplateConfig {
        &self.config
    }

    pub fn formats(&self) -> &TpFormats {
        &self.formats
    }

    pub fn cache(&self) -> &TpUserData {
        &self.cache
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn into_tree(self) -> T {
        self.tree
    }

    /// Injects `model` starting at the tree root.
    pub fn inject(&mut self, model: Value) -> Result<()> {
        self.inject_content(&TpContent::new(model))
    }

    /// Injects a prepared content, getters included, starting at the root.
    pub fn inject_content(&mut self, content: &TpContent) -> Result<()> {
        self.config.validate()?;
        let root = self.tree.root();
        let mut pass = self.pass(content);
        pass.inject_element(root, content.model())
    }

    /// Injects `model` into `element` only. The content operator of
    /// `element` is applied to the model itself.
    pub fn inject_subtree(&mut self, element: TpNodeId, model: Value) -> Result<()> {
        self.inject_subtree_content(element, &TpContent::new(model))
    }

    pub fn inject_subtree_content(&mut self, element: TpNodeId, content: &TpContent) -> Result<()> {
        self.config.validate()?;
        let mut pass = self.pass(content);
        let operators =
            TpOperatorsList::init_subtree(&*pass.tree, element, &pass.config.directive_prefix)?;
        pass.inject(element, content.model(), operators)
    }

    /// Drops cached state of `element` and its descendants. Call before
    /// removing an injected container from the tree by hand.
    pub fn release(&mut self, element: TpNodeId) {
        self.cache.release_subtree(&mut self.tree, element);
    }

    fn pass<'a>(&'a mut self, content: &'a TpContent) -> TpInjection<'a, T> {
        TpInjection {
            tree: &mut self.tree,
            content,
            cache: &mut self.cache,
            formats: &self.formats,
            config: &self.config,
            indexes: TpIndexStack::new(),
        }
    }
}

/// State of one injection pass.
pub struct TpInjection<'a, T: TpTree> {
    tree: &'a mut T,
    content: &'a TpContent,
    cache: &'a mut TpUserData,
    formats: &'a TpFormats,
    config: &'a TpTemplateConfig,
    indexes: TpIndexStack,
}

impl<'a, T: TpTree> TpInjection<'a, T> {
    pub fn tree(&self) -> &T {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut *self.tree
    }

    pub fn content(&self) -> &'a TpContent {
        self.content
    }

    pub fn cache(&self) -> &TpUserData {
        &*self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TpUserData {
        &mut *self.cache
    }

    pub fn config(&self) -> &'a TpTemplateConfig {
        self.config
    }

    pub fn indexes(&self) -> &TpIndexStack {
        &self.indexes
    }

    pub fn indexes_mut(&mut self) -> &mut TpIndexStack {
        &mut self.indexes
    }

    /// Removes every child of `element`, releasing their cached state.
    pub fn clear_children(&mut self, element: TpNodeId) {
        self.cache.clear_children(&mut *self.tree, element);
    }

    /// Formatter named by the element's format attribute, if any.
    pub fn formatter(&self, element: TpNodeId) -> Result<Option<Arc<dyn TpFormat>>> {
        match self.tree.get_attr(element, &self.config.format_attr) {
            Some(name) => self.formats.require(name).map(Some),
            None => Ok(None),
        }
    }

    /// Display string of a scalar value, through the element's formatter
    /// when it names one.
    pub fn format_value(&self, element: TpNodeId, value: &Value, site: &str) -> Result<String> {
        if let Some(format) = self.formatter(element)? {
            return format.format(value);
        }
        match value {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(TpError::contract(
                site,
                format!(
                    "element |{}| needs a formatter to display a {} value",
                    self.tree.trace(element),
                    type_name(other)
                ),
            )),
        }
    }

    /// Processes `element` as an ordinary tree member.
    pub fn inject_element(&mut self, element: TpNodeId, scope: &Value) -> Result<()> {
        let operators =
            TpOperatorsList::init_element(&*self.tree, element, &self.config.directive_prefix)?;
        self.inject(element, scope, operators)
    }

    /// Processes a clone produced by a repetition operator.
    pub fn inject_item(&mut self, element: TpNodeId, scope: &Value) -> Result<()> {
        let operators =
            TpOperatorsList::init_item(&*self.tree, element, &self.config.directive_prefix)?;
        self.inject(element, scope, operators)
    }

    fn inject(
        &mut self,
        mut element: TpNodeId,
        scope: &Value,
        mut operators: TpOperatorsList,
    ) -> Result<()> {
        if let Some(meta) = operators.jump().cloned() {
            let target = match execute_operator(self, meta.opcode, element, scope, &meta.operand)? {
                TpOutcome::Jump(id) => id,
                _ => return Ok(()),
            };
            element = self.tree.get_by_id(&target).ok_or_else(|| {
                TpError::contract(
                    "Template#inject",
                    format!("jump target |{}| not found", target),
                )
            })?;
            operators =
                TpOperatorsList::init_element(&*self.tree, element, &self.config.directive_prefix)?;
        }

        if let Some(meta) = operators.conditional() {
            let enabled = matches!(
                execute_operator(self, meta.opcode, element, scope, &meta.operand)?,
                TpOutcome::Branch(true)
            );
            let hidden = &self.config().hidden_class;
            if !enabled {
                log::debug!(
                    "Element |{}| rejected by conditional operator.",
                    self.tree.trace(element)
                );
                self.tree.add_css_class(element, hidden);
                return Ok(());
            }
            self.tree.remove_css_class(element, hidden);
        }

        if let Some(meta) = operators.inline() {
            execute_operator(self, meta.opcode, element, scope, &meta.operand)?;
            return Ok(());
        }

        for meta in operators.attributes() {
            execute_operator(self, meta.opcode, element, scope, &meta.operand)?;
        }

        let mut scope = Cow::Borrowed(scope);
        if let Some(meta) = operators.content() {
            match execute_operator(self, meta.opcode, element, &scope, &meta.operand)? {
                TpOutcome::Scope(value) => scope = Cow::Owned(value),
                _ => return Ok(()),
            }
        }

        for child in self.tree.children(element) {
            self.inject_element(child, &scope)?;
        }
        Ok(())
    }
}

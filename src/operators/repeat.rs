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

//! # Repetition Operators
//!
//! `LIST`/`OLIST` repeat an item template once per sequence element;
//! `MAP`/`OMAP` repeat a key template and a value template once per map
//! entry.
//!
//! ## Template Caching
//!
//! On the first run on a container the template children are detached and
//! stored in the template cache: the first element child is the item
//! template (or the key template, the second being the value template for
//! maps). The container is then emptied and refilled with deep clones, each
//! injected with the item initializer. Later runs reuse the cached
//! templates, so injecting twice renders the same children, not twice as
//! many.
//!
//! The ordered variants push an index on the pass index stack for the
//! duration of the run and increment it before every item, which makes the
//! position available to `NUMBERING` operators inside the items.

use serde_json::Value;

use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpError};
use crate::operator::{TpOperator, TpOutcome};
use crate::template::TpInjection;

#[derive(Clone, Copy)]
enum Slot {
    Item,
    Key,
    Value,
}

/// Cached template of `container`, detaching its first element child on
/// the first run.
fn cached_template<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    container: TpNodeId,
    slot: Slot,
    site: &str,
) -> Result<TpNodeId> {
    let cached = pass.cache().get(container).and_then(|data| match slot {
        Slot::Item => data.item_template,
        Slot::Key => data.key_template,
        Slot::Value => data.value_template,
    });
    if let Some(template) = cached {
        return Ok(template);
    }

    let template = pass.tree().first_child(container).ok_or_else(|| {
        let role = match slot {
            Slot::Item => "item",
            Slot::Key => "key",
            Slot::Value => "value",
        };
        TpError::contract(
            site,
            format!(
                "invalid container |{}|, missing {} template",
                pass.tree().trace(container),
                role
            ),
        )
    })?;
    pass.tree_mut().detach(template);
    let data = pass.cache_mut().entry(container);
    match slot {
        Slot::Item => data.item_template = Some(template),
        Slot::Key => data.key_template = Some(template),
        Slot::Value => data.value_template = Some(template),
    }
    Ok(template)
}

/// Clones `template` at the end of `container` and injects it.
fn append_item<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    container: TpNodeId,
    template: TpNodeId,
    scope: &Value,
) -> Result<()> {
    let clone = pass.tree_mut().clone_deep(template);
    pass.tree_mut().append_child(container, clone);
    pass.inject_item(clone, scope)
}

/// Runs `body` with a fresh index pushed when `ordered`, popping it
/// whatever the outcome.
fn with_index<'a, T: TpTree, F>(pass: &mut TpInjection<'a, T>, ordered: bool, body: F) -> Result<()>
where
    F: FnOnce(&mut TpInjection<'a, T>) -> Result<()>,
{
    if !ordered {
        return body(pass);
    }
    pass.indexes_mut().push();
    let result = body(pass);
    pass.indexes_mut().pop();
    result
}

fn render_list<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    element: TpNodeId,
    scope: &Value,
    operand: &str,
    ordered: bool,
    site: &str,
) -> Result<TpOutcome> {
    let template = cached_template(pass, element, Slot::Item, site)?;
    pass.clear_children(element);

    let items = pass.content().iterable(scope, operand)?;
    log::debug!(
        "Render {} items into element |{}| from property |{}|.",
        items.len(),
        pass.tree().trace(element),
        operand
    );
    with_index(pass, ordered, |pass| {
        for item in &items {
            if ordered {
                pass.indexes_mut().increment();
            }
            append_item(pass, element, template, item)?;
        }
        Ok(())
    })?;
    Ok(TpOutcome::Undefined)
}

fn render_map<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    element: TpNodeId,
    scope: &Value,
    operand: &str,
    ordered: bool,
    site: &str,
) -> Result<TpOutcome> {
    let key_template = cached_template(pass, element, Slot::Key, site)?;
    let value_template = cached_template(pass, element, Slot::Value, site)?;
    pass.clear_children(element);

    let entries = pass.content().mapping(scope, operand)?;
    log::debug!(
        "Render {} entries into element |{}| from property |{}|.",
        entries.len(),
        pass.tree().trace(element),
        operand
    );
    with_index(pass, ordered, |pass| {
        for (key, value) in &entries {
            if ordered {
                pass.indexes_mut().increment();
            }
            append_item(pass, element, key_template, &Value::String(key.clone()))?;
            append_item(pass, element, value_template, value)?;
        }
        Ok(())
    })?;
    Ok(TpOutcome::Undefined)
}

/// `data-list="path"`.
#[derive(Debug)]
pub struct TpListOperator;

impl TpOperator for TpListOperator {
    fn name(&self) -> &'static str {
        "ListOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        render_list(pass, element, scope, operand, false, "ListOperator#apply")
    }
}

/// `data-olist="path"`: ordered list feeding `NUMBERING`.
#[derive(Debug)]
pub struct TpOListOperator;

impl TpOperator for TpOListOperator {
    fn name(&self) -> &'static str {
        "OListOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        render_list(pass, element, scope, operand, true, "OListOperator#apply")
    }
}

/// `data-map="path"`.
#[derive(Debug)]
pub struct TpMapOperator;

impl TpOperator for TpMapOperator {
    fn name(&self) -> &'static str {
        "MapOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        render_map(pass, element, scope, operand, false, "MapOperator#apply")
    }
}

/// `data-omap="path"`: ordered map feeding `NUMBERING`.
#[derive(Debug)]
pub struct TpOMapOperator;

impl TpOperator for TpOMapOperator {
    fn name(&self) -> &'static str {
        "OMapOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        render_map(pass, element, scope, operand, true, "OMapOperator#apply")
    }
}

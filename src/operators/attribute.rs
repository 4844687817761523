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

//! # Attribute Operators
//!
//! Operators setting element attributes from model values. They run in
//! declaration order before the content operator of the element.
//!
//! | Directive    | Target attribute      | Accepted values     |
//! |--------------|-----------------------|---------------------|
//! | `data-attr`  | any, `name:path;...`  | strings, numbers    |
//! | `data-id`    | `id`                  | strings, numbers    |
//! | `data-href`  | `href`                | strings             |
//! | `data-src`   | `src`                 | strings             |
//! | `data-title` | `title`               | strings             |
//! | `data-value` | control value         | formatted scalars   |
//!
//! A `null` value removes the attribute. A missing property does the same
//! after the dispatcher logged it.

use serde_json::Value;

use crate::content::type_name;
use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpContentError, TpError};
use crate::operator::{split_pair, TpOperator, TpOutcome};
use crate::template::TpInjection;

const ELEMENTS_WITH_SRC: [&str; 7] = ["iframe", "script", "img", "input", "textarea", "video", "audio"];

const CONTROLS: [&str; 3] = ["input", "textarea", "select"];

/// Sets `attr` from the value at `path`, or removes it on `null`.
fn set_from_property<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    element: TpNodeId,
    scope: &Value,
    path: &str,
    attr: &str,
    accept_numbers: bool,
    site: &str,
) -> Result<()> {
    let value = pass.content().value(scope, path)?;
    let text = match value {
        Value::Null => {
            log::warn!(
                "Null property |{}|. Remove {} attribute from element |{}|.",
                path,
                attr,
                pass.tree().trace(element)
            );
            pass.tree_mut().remove_attr(element, attr);
            return Ok(());
        }
        Value::String(s) => s,
        Value::Number(n) if accept_numbers => n.to_string(),
        other => {
            return Err(TpError::contract(
                site,
                format!(
                    "property |{}| for {} attribute is a {}",
                    path,
                    attr,
                    type_name(&other)
                ),
            ))
        }
    };

    log::debug!(
        "Set element |{}| {} attribute from property |{}|.",
        pass.tree().trace(element),
        attr,
        path
    );
    pass.tree_mut().set_attr(element, attr, &text);
    Ok(())
}

/// Parses `name:path;name:path` into pairs.
fn parse_pairs(operand: &str) -> Result<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();
    for expression in operand.split(';') {
        let expression = expression.trim();
        if expression.is_empty() {
            continue;
        }
        let (name, path) = split_pair(expression, "AttrOperator#parse")?;
        let (name, path) = (name.trim(), path.trim());
        if name.is_empty() || path.is_empty() {
            return Err(TpError::contract(
                "AttrOperator#parse",
                format!("invalid attribute expression |{}|", expression),
            ));
        }
        pairs.push((name, path));
    }
    if pairs.is_empty() {
        return Err(TpError::contract(
            "AttrOperator#parse",
            format!("no attribute pair in |{}|", operand),
        ));
    }
    Ok(pairs)
}

/// `data-attr="name:path;name:path"`.
#[derive(Debug)]
pub struct TpAttrOperator;

impl TpOperator for TpAttrOperator {
    fn name(&self) -> &'static str {
        "AttrOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        for (name, path) in parse_pairs(operand)? {
            set_from_property(pass, element, scope, path, name, true, "AttrOperator#apply")?;
        }
        Ok(TpOutcome::Undefined)
    }

    fn recover<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        operand: &str,
        error: &TpContentError,
    ) -> Result<TpOutcome> {
        for (name, path) in parse_pairs(operand)? {
            if path == error.property_path {
                pass.tree_mut().remove_attr(element, name);
            }
        }
        Ok(TpOutcome::Undefined)
    }
}

macro_rules! single_attribute_operator {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $attr:literal, $numbers:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $ty;

        impl TpOperator for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn apply<T: TpTree>(
                &self,
                pass: &mut TpInjection<'_, T>,
                element: TpNodeId,
                scope: &Value,
                operand: &str,
            ) -> Result<TpOutcome> {
                set_from_property(
                    pass,
                    element,
                    scope,
                    operand,
                    $attr,
                    $numbers,
                    concat!($name, "#apply"),
                )?;
                Ok(TpOutcome::Undefined)
            }

            fn recover<T: TpTree>(
                &self,
                pass: &mut TpInjection<'_, T>,
                element: TpNodeId,
                _operand: &str,
                _error: &TpContentError,
            ) -> Result<TpOutcome> {
                pass.tree_mut().remove_attr(element, $attr);
                Ok(TpOutcome::Undefined)
            }
        }
    };
}

single_attribute_operator!(
    /// `data-id="path"`. Numeric ids are stringified.
    TpIdOperator, "IdOperator", "id", true
);
single_attribute_operator!(
    /// `data-href="path"`.
    TpHrefOperator, "HrefOperator", "href", false
);
single_attribute_operator!(
    /// `data-title="path"`.
    TpTitleOperator, "TitleOperator", "title", false
);

/// `data-src="path"`, only on elements that load a resource.
#[derive(Debug)]
pub struct TpSrcOperator;

impl TpOperator for TpSrcOperator {
    fn name(&self) -> &'static str {
        "SrcOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let tag = pass.tree().tag(element).to_ascii_lowercase();
        if !ELEMENTS_WITH_SRC.contains(&tag.as_str()) {
            return Err(TpError::contract(
                "SrcOperator#apply",
                format!(
                    "SRC operator is not supported on element |{}|",
                    pass.tree().trace(element)
                ),
            ));
        }
        set_from_property(pass, element, scope, operand, "src", false, "SrcOperator#apply")?;
        Ok(TpOutcome::Undefined)
    }

    fn recover<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        _operand: &str,
        _error: &TpContentError,
    ) -> Result<TpOutcome> {
        pass.tree_mut().remove_attr(element, "src");
        Ok(TpOutcome::Undefined)
    }
}

/// `data-value="path"` on form controls.
///
/// `input` gets its `value` attribute, `textarea` its text and `select`
/// marks the option with the matching value as selected.
#[derive(Debug)]
pub struct TpValueOperator;

impl TpValueOperator {
    fn control_tag<T: TpTree>(pass: &TpInjection<'_, T>, element: TpNodeId) -> Result<String> {
        let tag = pass.tree().tag(element).to_ascii_lowercase();
        if CONTROLS.contains(&tag.as_str()) {
            Ok(tag)
        } else {
            Err(TpError::contract(
                "ValueOperator#apply",
                format!("element |{}| is not a control", pass.tree().trace(element)),
            ))
        }
    }

    fn reset<T: TpTree>(pass: &mut TpInjection<'_, T>, element: TpNodeId, tag: &str) {
        let tree = pass.tree_mut();
        match tag {
            "textarea" => tree.remove_text(element),
            "select" => {
                for option in tree.children(element) {
                    tree.remove_attr(option, "selected");
                }
            }
            _ => tree.remove_attr(element, "value"),
        }
    }

    fn set<T: TpTree>(pass: &mut TpInjection<'_, T>, element: TpNodeId, tag: &str, text: &str) {
        let tree = pass.tree_mut();
        match tag {
            "textarea" => tree.set_text(element, text),
            "select" => {
                for option in tree.children(element) {
                    let matches = match tree.get_attr(option, "value") {
                        Some(value) => value == text,
                        None => tree.get_text(option).trim() == text,
                    };
                    if matches {
                        tree.set_attr(option, "selected", "selected");
                    } else {
                        tree.remove_attr(option, "selected");
                    }
                }
            }
            _ => tree.set_attr(element, "value", text),
        }
    }
}

impl TpOperator for TpValueOperator {
    fn name(&self) -> &'static str {
        "ValueOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let tag = Self::control_tag(pass, element)?;
        let value = pass.content().value(scope, operand)?;
        if value.is_null() {
            log::warn!(
                "Null property |{}|. Reset value for element |{}|.",
                operand,
                pass.tree().trace(element)
            );
            Self::reset(pass, element, &tag);
            return Ok(TpOutcome::Undefined);
        }

        let text = pass.format_value(element, &value, "ValueOperator#apply")?;
        log::debug!(
            "Set element |{}| value from property |{}|.",
            pass.tree().trace(element),
            operand
        );
        Self::set(pass, element, &tag, &text);
        Ok(TpOutcome::Undefined)
    }

    fn recover<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        _operand: &str,
        _error: &TpContentError,
    ) -> Result<TpOutcome> {
        let tag = Self::control_tag(pass, element)?;
        Self::reset(pass, element, &tag);
        Ok(TpOutcome::Undefined)
    }
}

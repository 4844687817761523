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

//! # Text Content Operators
//!
//! Terminal content operators: they render the element completely and the
//! injector does not descend into it afterwards.

use serde_json::Value;

use crate::content::type_name;
use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpContentError, TpError};
use crate::numbering;
use crate::operator::{TpOperator, TpOutcome};
use crate::template::TpInjection;

/// `data-text="path"`: replaces the element text.
#[derive(Debug)]
pub struct TpTextOperator;

impl TpOperator for TpTextOperator {
    fn name(&self) -> &'static str {
        "TextOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        if pass.tree().has_children(element) {
            return Err(TpError::contract(
                "TextOperator#apply",
                format!("element |{}| has children", pass.tree().trace(element)),
            ));
        }

        let value = pass.content().value(scope, operand)?;
        let empty = match &value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            log::warn!(
                "Null or empty property |{}|. Remove element |{}| text content.",
                operand,
                pass.tree().trace(element)
            );
            pass.tree_mut().remove_text(element);
            return Ok(TpOutcome::Undefined);
        }

        let text = pass.format_value(element, &value, "TextOperator#apply")?;
        log::debug!(
            "Set element |{}| text content from property |{}|.",
            pass.tree().trace(element),
            operand
        );
        pass.tree_mut().set_text(element, &text);
        Ok(TpOutcome::Undefined)
    }

    fn recover<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        _operand: &str,
        _error: &TpContentError,
    ) -> Result<TpOutcome> {
        pass.tree_mut().remove_text(element);
        Ok(TpOutcome::Undefined)
    }
}

/// `data-html="path"`: replaces the element content with parsed markup.
///
/// Children created by a previous run are tracked in the template cache, so
/// injecting again replaces them instead of tripping the children check.
#[derive(Debug)]
pub struct TpHtmlOperator;

impl TpOperator for TpHtmlOperator {
    fn name(&self) -> &'static str {
        "HtmlOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let produced_by_markup = pass
            .cache()
            .get(element)
            .map(|data| data.html_children)
            .unwrap_or(false);
        if pass.tree().has_children(element) && !produced_by_markup {
            return Err(TpError::contract(
                "HtmlOperator#apply",
                format!("element |{}| has children", pass.tree().trace(element)),
            ));
        }

        let markup = match pass.content().value(scope, operand)? {
            Value::Null => {
                log::warn!(
                    "Null property |{}|. Remove children from element |{}|.",
                    operand,
                    pass.tree().trace(element)
                );
                pass.clear_children(element);
                return Ok(TpOutcome::Undefined);
            }
            Value::String(markup) => markup,
            other => {
                return Err(TpError::contract(
                    "HtmlOperator#apply",
                    format!("property |{}| is a {}, not a string", operand, type_name(&other)),
                ))
            }
        };

        log::debug!(
            "Set element |{}| inner HTML from property |{}|.",
            pass.tree().trace(element),
            operand
        );
        pass.clear_children(element);
        pass.tree_mut().set_html(element, &markup)?;
        pass.cache_mut().entry(element).html_children = true;
        Ok(TpOutcome::Undefined)
    }

    fn recover<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        _operand: &str,
        _error: &TpContentError,
    ) -> Result<TpOutcome> {
        pass.clear_children(element);
        Ok(TpOutcome::Undefined)
    }
}

/// `data-numbering="%S.%n"`: renders the indexes of the enclosing ordered
/// lists.
#[derive(Debug)]
pub struct TpNumberingOperator;

impl TpOperator for TpNumberingOperator {
    fn name(&self) -> &'static str {
        "NumberingOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        _scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        if pass.indexes().is_empty() {
            log::warn!(
                "Required ordered collection index is missing on element |{}|. Numbering operator cancel execution.",
                pass.tree().trace(element)
            );
            return Ok(TpOutcome::Undefined);
        }

        let text = numbering::render(operand, &pass.indexes().values())?;
        log::debug!(
            "Set element |{}| numbering |{}| from format |{}|.",
            pass.tree().trace(element),
            text,
            operand
        );
        pass.tree_mut().set_text(element, &text);
        Ok(TpOutcome::Undefined)
    }
}

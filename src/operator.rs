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

//! # Tempa Operator Module
//!
//! This module defines the operator trait and the single dispatch point
//! through which the injector runs every directive.
//!
//! ## Operator Design
//!
//! An operator receives the injection pass, the element carrying the
//! directive, the current scope and the directive operand, mutates the
//! element and returns a [`TpOutcome`]:
//!
//! - `Jump(id)` from `GOTO`;
//! - `Branch(bool)` from the conditional operators;
//! - `Scope(value)` from `OBJECT`, the new scope for the element children;
//! - `Undefined` from everything else, which for a content operator means
//!   the element is fully rendered and its children are not visited.
//!
//! Operators are stateless unit structs. State that must survive between
//! injections (cached item templates) lives in the template cache reached
//! through the pass.
//!
//! ## Error Handling
//!
//! [`execute_operator`] is the only place operators are invoked. A
//! [`TpError::Content`] raised while an operator resolves a property is
//! logged as a warning, the operator's [`TpOperator::recover`] fallback is
//! applied (remove the attribute, clear the text, and so on) and injection
//! continues. Every other error propagates to the caller of `inject`.

use std::fmt;

use serde_json::Value;

use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpContentError, TpError};
use crate::opcode::TpOpcode;
use crate::operators::attribute::{
    TpAttrOperator, TpHrefOperator, TpIdOperator, TpSrcOperator, TpTitleOperator,
    TpValueOperator,
};
use crate::operators::conditional::{
    TpCaseOperator, TpExcludeOperator, TpIfNotOperator, TpIfOperator,
};
use crate::operators::jump::TpGotoOperator;
use crate::operators::object::TpObjectOperator;
use crate::operators::repeat::{
    TpListOperator, TpMapOperator, TpOListOperator, TpOMapOperator,
};
use crate::operators::text::{TpHtmlOperator, TpNumberingOperator, TpTextOperator};
use crate::template::TpInjection;

/// Result of one operator execution.
#[derive(Clone, Debug, PartialEq)]
pub enum TpOutcome {
    Undefined,
    Jump(String),
    Branch(bool),
    Scope(Value),
}

/// Behaviour bound to one opcode.
pub trait TpOperator: fmt::Debug {
    /// Name used in diagnostics, e.g. `TextOperator`.
    fn name(&self) -> &'static str;

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome>;

    /// Fail-soft fallback applied after `apply` hit missing content.
    fn recover<T: TpTree>(
        &self,
        _pass: &mut TpInjection<'_, T>,
        _element: TpNodeId,
        _operand: &str,
        _error: &TpContentError,
    ) -> Result<TpOutcome> {
        Ok(TpOutcome::Undefined)
    }
}

/// Runs the operator bound to `opcode`, turning content errors into warnings.
pub fn execute_operator<T: TpTree>(
    pass: &mut TpInjection<'_, T>,
    opcode: TpOpcode,
    element: TpNodeId,
    scope: &Value,
    operand: &str,
) -> Result<TpOutcome> {
    match opcode {
        TpOpcode::None => Ok(TpOutcome::Undefined),
        TpOpcode::Attr => run(&TpAttrOperator, pass, element, scope, operand),
        TpOpcode::Id => run(&TpIdOperator, pass, element, scope, operand),
        TpOpcode::Src => run(&TpSrcOperator, pass, element, scope, operand),
        TpOpcode::Href => run(&TpHrefOperator, pass, element, scope, operand),
        TpOpcode::Title => run(&TpTitleOperator, pass, element, scope, operand),
        TpOpcode::Value => run(&TpValueOperator, pass, element, scope, operand),
        TpOpcode::Exclude => run(&TpExcludeOperator, pass, element, scope, operand),
        TpOpcode::Goto => run(&TpGotoOperator, pass, element, scope, operand),
        TpOpcode::If => run(&TpIfOperator, pass, element, scope, operand),
        TpOpcode::IfNot => run(&TpIfNotOperator, pass, element, scope, operand),
        TpOpcode::Case => run(&TpCaseOperator, pass, element, scope, operand),
        TpOpcode::Text => run(&TpTextOperator, pass, element, scope, operand),
        TpOpcode::Html => run(&TpHtmlOperator, pass, element, scope, operand),
        TpOpcode::Numbering => run(&TpNumberingOperator, pass, element, scope, operand),
        TpOpcode::Object => run(&TpObjectOperator, pass, element, scope, operand),
        TpOpcode::List => run(&TpListOperator, pass, element, scope, operand),
        TpOpcode::OList => run(&TpOListOperator, pass, element, scope, operand),
        TpOpcode::Map => run(&TpMapOperator, pass, element, scope, operand),
        TpOpcode::OMap => run(&TpOMapOperator, pass, element, scope, operand),
    }
}

fn run<O: TpOperator, T: TpTree>(
    operator: &O,
    pass: &mut TpInjection<'_, T>,
    element: TpNodeId,
    scope: &Value,
    operand: &str,
) -> Result<TpOutcome> {
    match operator.apply(pass, element, scope, operand) {
        Err(TpError::Content(err)) => {
            log::warn!(
                "Undefined or invalid property for {}. Element |{}|, property path |{}|, cause: {}",
                operator.name(),
                pass.tree().trace(element),
                err.property_path,
                err.message
            );
            operator.recover(pass, element, operand, &err)
        }
        other => other,
    }
}

/// Splits an operand of the form `head:tail` at the first colon.
pub(crate) fn split_pair<'o>(operand: &'o str, site: &str) -> Result<(&'o str, &'o str)> {
    operand.split_once(':').ok_or_else(|| {
        TpError::contract(
            site,
            format!("invalid operand |{}|, expected |name:value|", operand),
        )
    })
}

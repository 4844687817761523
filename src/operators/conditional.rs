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

//! # Conditional Operators
//!
//! Branch operators deciding whether an element is rendered. A disabled
//! branch gets the hidden class and its subtree is left untouched.

use serde_json::Value;

use crate::content::type_name;
use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpError};
use crate::operator::{split_pair, TpOperator, TpOutcome};
use crate::template::TpInjection;

/// `data-if="path"`: enabled when the value is not empty.
#[derive(Debug)]
pub struct TpIfOperator;

impl TpOperator for TpIfOperator {
    fn name(&self) -> &'static str {
        "IfOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        _element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let empty = pass.content().is_empty(scope, operand)?;
        Ok(TpOutcome::Branch(!empty))
    }
}

/// `data-ifnot="path"`: enabled when the value is empty.
#[derive(Debug)]
pub struct TpIfNotOperator;

impl TpOperator for TpIfNotOperator {
    fn name(&self) -> &'static str {
        "IfNotOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        _element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let empty = pass.content().is_empty(scope, operand)?;
        Ok(TpOutcome::Branch(empty))
    }
}

/// `data-case="path:literal"`: enabled when the value equals the literal.
#[derive(Debug)]
pub struct TpCaseOperator;

impl TpOperator for TpCaseOperator {
    fn name(&self) -> &'static str {
        "CaseOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        let (path, literal) = split_pair(operand, "CaseOperator#apply")?;
        if literal.is_empty() {
            return Err(TpError::contract(
                "CaseOperator#apply",
                format!("invalid expression |{}|, missing literal", operand),
            ));
        }

        let value = pass.content().value(scope, path)?;
        let text = match &value {
            Value::Null => {
                log::warn!(
                    "Null property |{}|. Disable element |{}| branch.",
                    path,
                    pass.tree().trace(element)
                );
                return Ok(TpOutcome::Branch(false));
            }
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(TpError::contract(
                    "CaseOperator#apply",
                    format!("property |{}| is a {}, not a string", path, type_name(other)),
                ))
            }
        };

        let enabled = text == literal;
        log::debug!(
            "Property |{}| {}ables element |{}| branch.",
            path,
            if enabled { "en" } else { "dis" },
            pass.tree().trace(element)
        );
        Ok(TpOutcome::Branch(enabled))
    }
}

/// `data-exclude="true"`: unconditionally disables the branch.
#[derive(Debug)]
pub struct TpExcludeOperator;

impl TpOperator for TpExcludeOperator {
    fn name(&self) -> &'static str {
        "ExcludeOperator"
    }

    fn apply<T: TpTree>(
        &self,
        _pass: &mut TpInjection<'_, T>,
        _element: TpNodeId,
        _scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        Ok(TpOutcome::Branch(!operand.eq_ignore_ascii_case("true")))
    }
}

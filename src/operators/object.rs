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

use serde_json::Value;

use crate::content::type_name;
use crate::dom::{TpNodeId, TpTree};
use crate::errors::{Result, TpError};
use crate::operator::{TpOperator, TpOutcome};
use crate::template::TpInjection;

/// `data-object="path"`: narrows the scope of the element children.
#[derive(Debug)]
pub struct TpObjectOperator;

impl TpOperator for TpObjectOperator {
    fn name(&self) -> &'static str {
        "ObjectOperator"
    }

    fn apply<T: TpTree>(
        &self,
        pass: &mut TpInjection<'_, T>,
        element: TpNodeId,
        scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        match pass.content().value(scope, operand)? {
            Value::Null => {
                log::warn!(
                    "Null scope for property |{}| on element |{}|.",
                    operand,
                    pass.tree().trace(element)
                );
                Ok(TpOutcome::Undefined)
            }
            value @ Value::Object(_) => Ok(TpOutcome::Scope(value)),
            value if operand == "." => Ok(TpOutcome::Scope(value)),
            other => Err(TpError::contract(
                "ObjectOperator#apply",
                format!(
                    "property |{}| on element |{}| is a {}, expected an object",
                    operand,
                    pass.tree().trace(element),
                    type_name(&other)
                ),
            )),
        }
    }
}

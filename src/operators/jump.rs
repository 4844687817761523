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

use crate::dom::{TpNodeId, TpTree};
use crate::errors::Result;
use crate::operator::{TpOperator, TpOutcome};
use crate::template::TpInjection;

/// `data-goto="element-id"`: the operand is the id, not a property path.
#[derive(Debug)]
pub struct TpGotoOperator;

impl TpOperator for TpGotoOperator {
    fn name(&self) -> &'static str {
        "GotoOperator"
    }

    fn apply<T: TpTree>(
        &self,
        _pass: &mut TpInjection<'_, T>,
        _element: TpNodeId,
        _scope: &Value,
        operand: &str,
    ) -> Result<TpOutcome> {
        Ok(TpOutcome::Jump(operand.to_string()))
    }
}

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

//! # Operators Module
//!
//! One operator per directive keyword, grouped by what they act on.
//!
//! ## Operator Categories
//!
//! - **conditional**: `IF`, `IFNOT`, `CASE`, `EXCLUDE`
//! - **attribute**: `ATTR`, `ID`, `HREF`, `SRC`, `TITLE`, `VALUE`
//! - **text**: `TEXT`, `HTML`, `NUMBERING`
//! - **object**: `OBJECT`
//! - **repeat**: `LIST`, `OLIST`, `MAP`, `OMAP`
//! - **jump**: `GOTO`
//!
//! ## Usage
//!
//! Operators are not invoked directly; the injector dispatches to them
//! through [`execute_operator`](crate::operator::execute_operator).

pub mod attribute;
pub mod conditional;
pub mod jump;
pub mod object;
pub mod repeat;
pub mod text;

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

//! # Tempa Core Library
//!
//! Tempa injects data into markup templates. Templates are ordinary markup
//! documents whose elements carry directive attributes (`data-text`,
//! `data-list`, `data-if`, ...). Injecting a model walks the tree once and
//! rewrites text, attributes, visibility and repeated children so the
//! document reflects the model. There is no template language and no
//! separate compilation step: the template stays valid markup before and
//! after injection.
//!
//! ## Module Overview
//!
//! - **opcode**: directive attribute names and their execution categories
//! - **content**: property path resolution over the model
//! - **operators_list**: per-element directive extraction
//! - **operator**: operator trait and the single dispatch point
//! - **operators**: the built-in operators
//! - **template**: the injector and its cache
//! - **numbering**: index formatting for ordered lists
//! - **format**: pluggable value formatters
//! - **dom**: element-tree capability and the bundled arena document
//! - **config**: template configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let markup = r#"<ul data-olist=".steps"><li><b data-numbering="%n."/><span data-text="title"/></li></ul>"#;
//! let html = tempa::render(markup, json!({
//!     "steps": [{"title": "Parse"}, {"title": "Inject"}]
//! })).unwrap();
//! assert!(html.contains("<b data-numbering=\"%n.\">2.</b>"));
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, TpError>`. Missing model properties are
//! logged through the `log` facade and do not abort an injection; malformed
//! templates do.

pub mod cache;
pub mod config;
pub mod content;
pub mod dom;
pub mod errors;
pub mod format;
pub mod index;
pub mod numbering;
pub mod opcode;
pub mod operator;
pub mod operators;
pub mod operators_list;
pub mod template;

pub use cache::{TpElementData, TpUserData};
pub use config::TpTemplateConfig;
pub use content::{TpContent, TpGetter};
pub use dom::{TpDocument, TpNodeId, TpTree};
pub use errors::{Result, TpContentError, TpError};
pub use format::{TpFormat, TpFormats};
pub use index::{TpIndex, TpIndexStack};
pub use numbering::TpNumbering;
pub use opcode::{TpOpcode, TpOpcodeType};
pub use operator::{execute_operator, TpOperator, TpOutcome};
pub use operators_list::{TpOperatorMeta, TpOperatorsList};
pub use template::{TpInjection, TpTemplate};

use serde_json::Value;

/// Parses `markup`, injects `model` from the root and serializes the result.
pub fn render(markup: &str, model: Value) -> Result<String> {
    let mut template = TpTemplate::new(TpDocument::parse(markup)?);
    template.inject(model)?;
    Ok(template.into_tree().to_markup())
}

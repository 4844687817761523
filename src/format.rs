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

//! # Value Formatters
//!
//! Elements may name a formatter through the `data-format` attribute. When
//! they do, `TEXT` and `VALUE` render the model value through it instead of
//! plain stringification. Tempa ships no concrete formatter; applications
//! register their own (dates, currencies, units) in a [`TpFormats`] registry
//! handed to the template.
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::Value;
//! use tempa::errors::Result;
//! use tempa::format::{TpFormat, TpFormats};
//!
//! #[derive(Debug)]
//! struct Upper;
//!
//! impl TpFormat for Upper {
//!     fn format(&self, value: &Value) -> Result<String> {
//!         Ok(value.as_str().unwrap_or_default().to_uppercase())
//!     }
//! }
//!
//! let formats = TpFormats::new().with("upper", Arc::new(Upper));
//! assert!(formats.get("upper").is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{Result, TpError};

/// Converts model values to display strings and back.
pub trait TpFormat: fmt::Debug + Send + Sync {
    fn format(&self, value: &Value) -> Result<String>;

    /// Reverse conversion, for forms reading values back.
    fn parse(&self, text: &str) -> Result<Value> {
        Ok(Value::String(text.to_string()))
    }

    /// Whether `text` is acceptable input for [`TpFormat::parse`].
    fn test(&self, text: &str) -> bool {
        self.parse(text).is_ok()
    }
}

/// Named formatter registry shared by a template.
#[derive(Clone, Debug, Default)]
pub struct TpFormats {
    formats: HashMap<String, Arc<dyn TpFormat>>,
}

impl TpFormats {
    pub fn new() -> Self {
        TpFormats::default()
    }

    pub fn with(mut self, name: impl Into<String>, format: Arc<dyn TpFormat>) -> Self {
        self.register(name, format);
        self
    }

    pub fn register(&mut self, name: impl Into<String>, format: Arc<dyn TpFormat>) {
        self.formats.insert(name.into(), format);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TpFormat>> {
        self.formats.get(name).cloned()
    }

    /// Looks up a formatter named by a template, failing on unknown names.
    pub fn require(&self, name: &str) -> Result<Arc<dyn TpFormat>> {
        self.get(name).ok_or_else(|| {
            TpError::contract(
                "TpFormats#require",
                format!("no formatter registered under |{}|", name),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

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

//! # Template Configuration
//!
//! Names the template engine reads from markup. The defaults match the
//! conventional `data-*` vocabulary; a configuration file can move the
//! directives under another prefix (`tp:` for XML documents, say).
//!
//! Configuration can be loaded from JSON or YAML:
//!
//! ```yaml
//! directive_prefix: "tp:"
//! hidden_class: collapsed
//! ```
//!
//! Missing fields take their default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TpError};
use crate::opcode::DEFAULT_DIRECTIVE_PREFIX;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TpTemplateConfig {
    /// Prefix shared by every directive attribute.
    pub directive_prefix: String,
    /// CSS class added to elements rejected by a conditional operator.
    pub hidden_class: String,
    /// Attribute naming the formatter of an element.
    pub format_attr: String,
}

impl Default for TpTemplateConfig {
    fn default() -> Self {
        TpTemplateConfig {
            directive_prefix: DEFAULT_DIRECTIVE_PREFIX.to_string(),
            hidden_class: "hidden".to_string(),
            format_attr: "data-format".to_string(),
        }
    }
}

impl TpTemplateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.directive_prefix = prefix.into();
        self
    }

    pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    pub fn format_attr(mut self, attr: impl Into<String>) -> Self {
        self.format_attr = attr.into();
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: TpTemplateConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: TpTemplateConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&source),
            "yaml" | "yml" => Self::from_yaml_str(&source),
            other => Err(TpError::config(format!(
                "unsupported config file extension |{}|",
                other
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.directive_prefix.is_empty() {
            return Err(TpError::config("directive_prefix must not be empty"));
        }
        if self.hidden_class.trim().is_empty() || self.hidden_class.contains(char::is_whitespace) {
            return Err(TpError::config("hidden_class must be a single class name"));
        }
        if self.format_attr.is_empty() {
            return Err(TpError::config("format_attr must not be empty"));
        }
        Ok(())
    }
}

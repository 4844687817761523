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

//! # Tempa Error Module
//!
//! This module defines the error types used throughout Tempa.
//!
//! ## Error Classes
//!
//! Injection distinguishes two failure classes:
//!
//! - **Content**: a property path does not exist in the supplied model. These
//!   are expected at runtime; the operator dispatcher logs them as warnings and
//!   falls back to the opcode's no-op result, so the rest of the tree is still
//!   injected.
//! - **Contract**: the template is malformed or its shape does not match the
//!   model (two conditionals on one element, a list without item template, a
//!   mapping where a sequence was expected). These propagate out of
//!   `inject` untouched.
//!
//! The remaining variants cover the ambient concerns: markup parsing,
//! formatters, configuration, IO and serialization.
//!
//! ## Usage
//!
//! ```rust
//! use tempa::errors::{Result, TpError};
//!
//! fn check_operand(operand: &str) -> Result<()> {
//!     if operand.is_empty() {
//!         return Err(TpError::contract("OperatorsList#init_element", "empty operand"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use thiserror::Error;

/// Convenience result type used throughout Tempa.
pub type Result<T> = std::result::Result<T, TpError>;

/// A property path that could not be resolved against the model.
///
/// Raised by [`TpContent`](crate::content::TpContent) when a segment is
/// neither a property of the inspected object nor served by a registered
/// getter, or when a scalar is met in the middle of a path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} (property path: {property_path})")]
pub struct TpContentError {
    /// Path, or path segment, that failed to resolve.
    pub property_path: String,
    /// Human readable cause.
    pub message: String,
}

impl TpContentError {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        TpContentError {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

/// Canonical error enumeration for Tempa.
#[derive(Debug, Error)]
pub enum TpError {
    /// Missing model data. Soft failure, see the module docs.
    #[error("content error: {0}")]
    Content(#[from] TpContentError),

    /// Malformed template or template/model shape mismatch.
    #[error("contract violation in {site}: {message}")]
    Contract { site: String, message: String },

    /// Markup that the document parser rejected.
    #[error("markup error: {0}")]
    Markup(String),

    /// Failure reported by a value formatter.
    #[error("format '{format}' failed: {message}")]
    Format { format: String, message: String },

    /// Invalid template configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for TpError {
    fn from(err: io::Error) -> Self {
        TpError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TpError {
    fn from(err: serde_json::Error) -> Self {
        TpError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for TpError {
    fn from(err: serde_yaml::Error) -> Self {
        TpError::Serde(err.to_string())
    }
}

impl From<quick_xml::Error> for TpError {
    fn from(err: quick_xml::Error) -> Self {
        TpError::Markup(err.to_string())
    }
}

impl TpError {
    /// Helper to construct content errors.
    pub fn content(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        TpError::Content(TpContentError::new(property_path, message))
    }

    /// Helper to construct contract violations. `site` names the operation
    /// that detected the violation, e.g. `ListOperator#exec`.
    pub fn contract(site: impl Into<String>, message: impl Into<String>) -> Self {
        TpError::Contract {
            site: site.into(),
            message: message.into(),
        }
    }

    /// Helper to construct markup errors.
    pub fn markup<T: Into<String>>(message: T) -> Self {
        TpError::Markup(message.into())
    }

    /// Helper to construct formatter errors.
    pub fn format(format: impl Into<String>, message: impl Into<String>) -> Self {
        TpError::Format {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Helper to construct configuration errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        TpError::Config(message.into())
    }

    /// Whether this is a soft content failure.
    pub fn is_content(&self) -> bool {
        matches!(self, TpError::Content(_))
    }

    /// Whether this is a contract violation.
    pub fn is_contract(&self) -> bool {
        matches!(self, TpError::Contract { .. })
    }
}

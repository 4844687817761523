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

//! # Content Module
//!
//! [`TpContent`] wraps the model injected into a template and resolves
//! property paths against it.
//!
//! ## Property Paths
//!
//! - `.` is the current scope itself.
//! - `.user.name` is absolute: it starts from the model root whatever the
//!   current scope is.
//! - `user.name` is relative to the current scope.
//!
//! Segments address object properties. On arrays a segment may be a decimal
//! index or `length`. When a property is missing the resolver looks for a
//! getter registered as `get` followed by the capitalized segment and calls
//! it with the object being inspected.
//!
//! A `null` met in the middle of a path resolves the whole path to `null`.
//! A missing property, or a scalar met in the middle of a path, is a
//! [`TpContentError`](crate::errors::TpContentError).
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tempa::content::TpContent;
//!
//! let content = TpContent::new(json!({"user": {"first": "Ada", "last": "Lovelace"}}))
//!     .with_getter("getFullName", |user| {
//!         json!(format!("{} {}", user["first"].as_str().unwrap_or(""), user["last"].as_str().unwrap_or("")))
//!     });
//! let user = content.value(content.model(), ".user").unwrap();
//! assert_eq!(content.value(&user, "fullName").unwrap(), json!("Ada Lovelace"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::{Result, TpError};

/// Computed accessor called with the object being inspected.
pub type TpGetter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Read-only model plus named getters.
#[derive(Clone)]
pub struct TpContent {
    model: Value,
    getters: HashMap<String, TpGetter>,
}

impl TpContent {
    pub fn new(model: Value) -> Self {
        TpContent {
            model,
            getters: HashMap::new(),
        }
    }

    /// Registers a getter, e.g. `getFullName` serving the `fullName` segment.
    pub fn with_getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(getter));
        self
    }

    /// Model root.
    pub fn model(&self) -> &Value {
        &self.model
    }

    /// Resolves `path` against `scope`, or against the model root when the
    /// path is absolute.
    pub fn value(&self, scope: &Value, path: &str) -> Result<Value> {
        self.resolve(scope, path).map(Cow::into_owned)
    }

    /// Emptiness of the value at `path`: null, zero length, zero entries,
    /// `false` and `0` are empty.
    pub fn is_empty(&self, scope: &Value, path: &str) -> Result<bool> {
        let value = self.resolve(scope, path)?;
        Ok(is_empty_value(&value))
    }

    /// Sequence at `path`. Null yields an empty sequence.
    pub fn iterable(&self, scope: &Value, path: &str) -> Result<Vec<Value>> {
        match self.resolve(scope, path)?.into_owned() {
            Value::Null => {
                log::warn!("Null iterable value for property |{}|. Use empty list.", path);
                Ok(Vec::new())
            }
            Value::Array(items) => Ok(items),
            other => Err(TpError::contract(
                "Content#iterable",
                format!(
                    "property |{}| is not iterable, found {}",
                    path,
                    type_name(&other)
                ),
            )),
        }
    }

    /// Map at `path`, in model key order. Null yields an empty map.
    pub fn mapping(&self, scope: &Value, path: &str) -> Result<Map<String, Value>> {
        match self.resolve(scope, path)?.into_owned() {
            Value::Null => {
                log::warn!("Null map value for property |{}|. Use empty map.", path);
                Ok(Map::new())
            }
            Value::Object(entries) => Ok(entries),
            other => Err(TpError::contract(
                "Content#mapping",
                format!("property |{}| is not a map, found {}", path, type_name(&other)),
            )),
        }
    }

    fn resolve<'v>(&'v self, scope: &'v Value, path: &str) -> Result<Cow<'v, Value>> {
        if path == "." {
            return Ok(Cow::Borrowed(scope));
        }
        let (start, relative) = match path.strip_prefix('.') {
            Some(rest) => (&self.model, rest),
            None => (scope, path),
        };

        match start {
            Value::Null => return Ok(Cow::Owned(Value::Null)),
            Value::Object(_) | Value::Array(_) => {}
            scalar => {
                return Err(TpError::contract(
                    "Content#value",
                    format!(
                        "cannot resolve property |{}| on {} scope",
                        path,
                        type_name(scalar)
                    ),
                ))
            }
        }

        let segments: Vec<&str> = relative.split('.').collect();
        let mut current = Cow::Borrowed(start);
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(TpError::content(path, "empty path segment"));
            }
            current = match current {
                Cow::Borrowed(object) => self.property(object, segment, path)?,
                Cow::Owned(object) => Cow::Owned(self.property(&object, segment, path)?.into_owned()),
            };
            if i + 1 == segments.len() {
                break;
            }
            match &*current {
                Value::Null => return Ok(Cow::Owned(Value::Null)),
                Value::Object(_) | Value::Array(_) => {}
                scalar => {
                    return Err(TpError::content(
                        path,
                        format!("segment |{}| is a {}, not an object", segment, type_name(scalar)),
                    ))
                }
            }
        }
        Ok(current)
    }

    fn property<'v>(&self, object: &'v Value, segment: &str, path: &str) -> Result<Cow<'v, Value>> {
        let direct = match object {
            Value::Object(map) => map.get(segment),
            Value::Array(items) if segment == "length" => {
                return Ok(Cow::Owned(Value::from(items.len())));
            }
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        if let Some(value) = direct {
            return Ok(Cow::Borrowed(value));
        }
        match self.getters.get(&getter_name(segment)) {
            Some(getter) => Ok(Cow::Owned(getter(object))),
            None => Err(TpError::content(
                path,
                format!("missing property |{}|", segment),
            )),
        }
    }
}

impl fmt::Debug for TpContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut getters: Vec<&String> = self.getters.keys().collect();
        getters.sort();
        f.debug_struct("TpContent")
            .field("model", &self.model)
            .field("getters", &getters)
            .finish()
    }
}

impl From<Value> for TpContent {
    fn from(model: Value) -> Self {
        TpContent::new(model)
    }
}

/// Emptiness rule shared by the conditional operators.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Short type label used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn getter_name(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

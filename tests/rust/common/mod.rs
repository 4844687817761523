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

//! # Shared Test Helpers
//!
//! Included by every integration test target through
//! `#[path = "../common/mod.rs"] mod common;`.
//!
//! The capturing logger is installed once per process and records into a
//! thread-local buffer, so concurrently running tests only see their own
//! log lines.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::Value;
use tempa::{Result, TpDocument, TpTemplate};

struct CapturingLogger;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;
static INIT: Once = Once::new();

/// Installs the capturing logger and clears this thread's buffer.
pub fn capture_logs() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Debug);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Warnings logged on this thread since the last `capture_logs`.
pub fn warnings() -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

/// Parses `markup` into a fresh template.
pub fn template(markup: &str) -> TpTemplate<TpDocument> {
    TpTemplate::new(TpDocument::parse(markup).expect("test markup must parse"))
}

/// Injects `model` into `markup` and returns the serialized result.
pub fn render(markup: &str, model: Value) -> Result<String> {
    tempa::render(markup, model)
}

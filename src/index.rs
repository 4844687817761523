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

//! # Ordered Indexes
//!
//! Counters maintained by the ordered repetition operators (`OLIST`,
//! `OMAP`). Each execution pushes a fresh [`TpIndex`] and increments it
//! before every item, so the first item sees `1`. Nested ordered lists stack
//! their indexes outer to inner, which is what `NUMBERING` formats read.

/// Counter of one ordered repetition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TpIndex {
    value: usize,
}

impl TpIndex {
    pub fn new() -> Self {
        TpIndex::default()
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn value(&self) -> usize {
        self.value
    }
}

/// Stack of active indexes, outer to inner.
#[derive(Clone, Debug, Default)]
pub struct TpIndexStack {
    indexes: Vec<TpIndex>,
}

impl TpIndexStack {
    pub fn new() -> Self {
        TpIndexStack::default()
    }

    pub fn push(&mut self) {
        self.indexes.push(TpIndex::new());
    }

    pub fn pop(&mut self) -> Option<TpIndex> {
        self.indexes.pop()
    }

    /// Increments the innermost index.
    pub fn increment(&mut self) {
        if let Some(index) = self.indexes.last_mut() {
            index.increment();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Current values, outer to inner.
    pub fn values(&self) -> Vec<usize> {
        self.indexes.iter().map(TpIndex::value).collect()
    }
}

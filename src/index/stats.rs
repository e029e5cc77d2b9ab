// Copyright 2025 Keydex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-index operation counters
//!
//! Plain monotonic counters with relaxed ordering; no happens-before is
//! claimed between counters and data operations. Mutations only touch
//! counters after they succeed, so failed operations are invisible here.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Operation counters, tuple count, and the catalog-facing dirty bit
#[derive(Debug, Default)]
pub struct IndexStats {
    lookups: AtomicU64,
    inserts: AtomicU64,
    deletes: AtomicU64,
    updates: AtomicU64,
    tuples: AtomicU64,
    dirty: AtomicBool,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        self.tuples.fetch_add(1, Ordering::Relaxed);
        self.dirty.store(true, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.tuples.fetch_sub(1, Ordering::Relaxed);
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Number of scan operations (point, full, and range)
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of successful inserts
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Number of successful deletes
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Number of successful in-place updates
    ///
    /// The engine exposes no update operation; the counter exists for the
    /// catalog layer and stays zero here.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Current number of (key, item) entries
    pub fn number_of_tuples(&self) -> u64 {
        self.tuples.load(Ordering::Relaxed)
    }

    /// Overwrite the tuple count (catalog stats path)
    pub fn set_number_of_tuples(&self, count: u64) {
        self.tuples.store(count, Ordering::Relaxed);
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Whether the index changed since the last `reset_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Clear the dirty bit (catalog vacuum/stats path)
    pub fn reset_dirty(&self) {
        self.dirty.store(false, Ordering::Relaxed);
    }
}

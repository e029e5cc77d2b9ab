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

//! Variable-length pool for string payloads
//!
//! Tuples do not own their string bytes directly; `set_value` interns
//! Char/Varchar payloads into a pool and the tuple keeps an `Arc<str>`
//! handle. The pool is internally synchronised, so the index can share its
//! own pool across concurrent scans building search keys.
//!
//! `release_all` drops the pool's references only. Outstanding handles keep
//! their payloads alive, which is what guarantees a tuple's strings live at
//! least as long as the tuple itself.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::error::{Error, Result};

struct PoolInner {
    allocations: Vec<Arc<str>>,
    allocated_bytes: usize,
}

/// Scoped allocator for variable-length payloads
///
/// Unbounded by default; `with_limit` caps the total bytes held, after
/// which `allocate` fails with [`Error::OutOfMemory`].
pub struct VarlenPool {
    limit: Option<usize>,
    inner: Mutex<PoolInner>,
}

impl VarlenPool {
    /// Create an unbounded pool
    pub fn new() -> Self {
        Self {
            limit: None,
            inner: Mutex::new(PoolInner {
                allocations: Vec::new(),
                allocated_bytes: 0,
            }),
        }
    }

    /// Create a pool bounded to `limit` total payload bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    /// Intern a payload, returning a handle that outlives `release_all`
    pub fn allocate(&self, payload: &str) -> Result<Arc<str>> {
        let mut inner = self.inner.lock();

        if let Some(limit) = self.limit {
            if inner.allocated_bytes + payload.len() > limit {
                return Err(Error::OutOfMemory {
                    requested: payload.len(),
                    limit,
                });
            }
        }

        let handle: Arc<str> = Arc::from(payload);
        inner.allocated_bytes += payload.len();
        inner.allocations.push(Arc::clone(&handle));
        Ok(handle)
    }

    /// Drop the pool's references and reset the accounting
    pub fn release_all(&self) {
        let mut inner = self.inner.lock();
        inner.allocations.clear();
        inner.allocated_bytes = 0;
    }

    /// Total payload bytes currently held by the pool
    pub fn allocated_bytes(&self) -> usize {
        self.inner.lock().allocated_bytes
    }
}

impl Default for VarlenPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VarlenPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("VarlenPool")
            .field("limit", &self.limit)
            .field("allocations", &inner.allocations.len())
            .field("allocated_bytes", &inner.allocated_bytes)
            .finish()
    }
}
